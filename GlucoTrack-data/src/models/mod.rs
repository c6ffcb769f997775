// Data storage models
pub mod glucose;

// Re-export commonly used types
pub use glucose::{GlucoseReading, GlucoseTargets, ReminderTime};
