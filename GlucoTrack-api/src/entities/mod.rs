// Public entities for the GlucoTrack API
// This module contains data structures that are shared across the application boundary

// Re-export data structures for glucose targets and analysis
pub mod glucose;
