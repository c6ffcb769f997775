// GlucoTrack Domain
// This crate contains the business logic for the GlucoTrack application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the database module from gluco_track_data for convenience
pub use gluco_track_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
