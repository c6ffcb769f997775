// Handler unit tests
mod glucose_test;
mod health_test;
