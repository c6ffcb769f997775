use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// An inclusive target range in mg/dL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct TargetRange {
    /// Lower bound (inclusive)
    pub min: f64,

    /// Upper bound (inclusive)
    pub max: f64,
}

/// A single scheduled measurement reminder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReminderTime {
    /// Time of day in "HH:MM" format
    pub time: String,

    /// Reading category the reminder is for ("fasting", "post_meal" or "random")
    pub category: String,

    /// Whether this individual reminder is active
    pub enabled: bool,
}

/// Public representation of a patient's glucose target configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlucoseTargets {
    /// Unique identifier for the configuration
    pub id: String,

    /// Patient this configuration belongs to
    pub patient_id: String,

    /// Target range for fasting readings
    pub fasting: TargetRange,

    /// Target range for post-meal readings
    pub post_meal: TargetRange,

    /// Target range for random readings
    pub random: TargetRange,

    /// Measurement unit, "mg/dL" or "mmol/L"
    pub unit: String,

    /// Optional free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether measurement reminders are enabled
    pub reminder_enabled: bool,

    /// Scheduled reminder times
    pub reminder_times: Vec<ReminderTime>,

    /// Weekday names the reminders apply to
    pub reminder_days: Vec<String>,

    /// When the configuration was last saved (RFC 3339)
    pub updated_at: String,
}

/// Request payload for updating glucose targets.
/// Absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGlucoseTargetsRequest {
    /// Lower bound for fasting readings
    #[validate(range(min = 20.0, max = 600.0, message = "Fasting minimum must be between 20 and 600"))]
    pub fasting_min: Option<f64>,

    /// Upper bound for fasting readings
    #[validate(range(min = 20.0, max = 600.0, message = "Fasting maximum must be between 20 and 600"))]
    pub fasting_max: Option<f64>,

    /// Lower bound for post-meal readings
    #[validate(range(min = 20.0, max = 600.0, message = "Post-meal minimum must be between 20 and 600"))]
    pub post_meal_min: Option<f64>,

    /// Upper bound for post-meal readings
    #[validate(range(min = 20.0, max = 600.0, message = "Post-meal maximum must be between 20 and 600"))]
    pub post_meal_max: Option<f64>,

    /// Lower bound for random readings
    #[validate(range(min = 20.0, max = 600.0, message = "Random minimum must be between 20 and 600"))]
    pub random_min: Option<f64>,

    /// Upper bound for random readings
    #[validate(range(min = 20.0, max = 600.0, message = "Random maximum must be between 20 and 600"))]
    pub random_max: Option<f64>,

    /// Measurement unit
    #[validate(length(max = 10, message = "Unit cannot exceed 10 characters"))]
    pub unit: Option<String>,

    /// Free-text notes
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for updating reminder settings.
/// The enabled flag always replaces the stored value; times and days
/// are replaced only when provided.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReminderSettingsRequest {
    /// Whether measurement reminders are enabled
    pub reminder_enabled: bool,

    /// Replacement reminder schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_times: Option<Vec<ReminderTime>>,

    /// Replacement weekday names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_days: Option<Vec<String>>,
}

/// Response for a successful targets or reminder update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetsUpdatedResponse {
    /// Human-readable confirmation message
    pub message: String,

    /// The configuration after the update
    pub targets: GlucoseTargets,
}

/// Per-category aggregate statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CategoryStats {
    /// Number of readings in the category
    pub total: usize,

    /// Number of those readings inside the target range
    pub within_target: usize,

    /// Mean value, rounded to the nearest integer; 0 with no readings
    pub average: i64,
}

/// Aggregate statistics grouped by reading category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CategoryBreakdown {
    /// Statistics for fasting readings
    pub fasting: CategoryStats,

    /// Statistics for post-meal readings
    pub post_meal: CategoryStats,

    /// Statistics for random readings
    pub random: CategoryStats,
}

/// Analysis of a window of glucose readings against the patient's targets
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlucoseAnalysis {
    /// Number of readings in the window
    pub total_readings: usize,

    /// Readings inside their category's target range
    pub within_target: usize,

    /// Readings above their category's maximum
    pub above_target: usize,

    /// Readings below their category's minimum
    pub below_target: usize,

    /// Mean of all values in the window, rounded; 0 with no readings
    pub average_glucose: i64,

    /// Aggregates broken down by reading category
    pub readings_by_category: CategoryBreakdown,

    /// Short-term trend: "improving", "worsening" or "stable"
    pub recent_trend: String,

    /// Advisory messages in rule-evaluation order
    pub recommendations: Vec<String>,
}

/// Response for the glucose analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    /// The patient's target configuration the analysis was run against
    pub targets: GlucoseTargets,

    /// The computed analysis
    pub analysis: GlucoseAnalysis,

    /// Human-readable window label, e.g. "30 days"
    pub period: String,
}
