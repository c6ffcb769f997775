pub mod glucose;
pub mod health;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use glucose::{
    get_glucose_analysis, get_glucose_targets, update_glucose_targets, update_reminder_settings,
};
pub use health::health_check;
