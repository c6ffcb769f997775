// Domain entities and value objects
pub mod conversions;
pub mod glucose;

// Re-export common types for easier imports
pub use glucose::{
    AnalysisReport, CategoryBreakdown, CategoryStats, GlucoseAnalysis, GlucoseReading,
    GlucoseTargets, GlucoseTrend, ReadingCategory, ReadingStatus, ReminderSettingsUpdate,
    ReminderTime, TargetRange, UpdateTargetsRequest,
};
