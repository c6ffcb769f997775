use serde::{Deserialize, Serialize};

/// Category of a blood glucose reading.
///
/// Readings arriving without a category, or with one the portal does not
/// recognize, are treated as `Random`; that fallback is the enum default
/// rather than an ad-hoc string check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReadingCategory {
    /// Measured after a fasting period (e.g. before breakfast)
    Fasting,
    /// Measured shortly after eating
    PostMeal,
    /// Measured at an arbitrary time; the fallback category
    #[default]
    Random,
}

impl ReadingCategory {
    /// All categories, in the order they are reported in analyses
    pub const ALL: [ReadingCategory; 3] = [
        ReadingCategory::Fasting,
        ReadingCategory::PostMeal,
        ReadingCategory::Random,
    ];

    /// Parse a stored category string, falling back to `Random` for
    /// anything missing or unrecognized
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("fasting") => ReadingCategory::Fasting,
            Some("post_meal") => ReadingCategory::PostMeal,
            _ => ReadingCategory::Random,
        }
    }

    /// Wire/storage name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingCategory::Fasting => "fasting",
            ReadingCategory::PostMeal => "post_meal",
            ReadingCategory::Random => "random",
        }
    }
}

/// An inclusive target range in mg/dL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl TargetRange {
    /// A range is valid when its minimum is strictly below its maximum
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Whether a value falls within the range, boundaries included
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A patient's glucose target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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
    pub notes: Option<String>,

    /// Whether measurement reminders are enabled
    pub reminder_enabled: bool,

    /// Scheduled reminder times
    pub reminder_times: Vec<ReminderTime>,

    /// Weekday names the reminders apply to
    pub reminder_days: Vec<String>,

    /// When the configuration was last saved
    pub updated_at: String,
}

impl GlucoseTargets {
    /// Target range for a reading category.
    ///
    /// This is the single category-to-range lookup; classification and the
    /// per-category recommendation rule both go through it.
    pub fn range_for(&self, category: ReadingCategory) -> TargetRange {
        match category {
            ReadingCategory::Fasting => self.fasting,
            ReadingCategory::PostMeal => self.post_meal,
            ReadingCategory::Random => self.random,
        }
    }
}

/// A single scheduled measurement reminder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderTime {
    /// Time of day in "HH:MM" format
    pub time: String,

    /// Reading category the reminder is for
    pub category: ReadingCategory,

    /// Whether this individual reminder is active
    pub enabled: bool,
}

/// A blood glucose reading as seen by the analysis engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlucoseReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Measured value in mg/dL
    pub value: f64,

    /// Reading category, already resolved to the fallback where absent
    pub category: ReadingCategory,

    /// When the reading was taken
    pub timestamp: String,
}

/// Where a reading falls relative to its target range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    /// Inside the configured range, boundaries included
    Within,
    /// Above the configured maximum
    Above,
    /// Below the configured minimum
    Below,
}

/// Coarse short-term trend over recent readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseTrend {
    /// Recent average meaningfully below the previous one
    Improving,
    /// Recent average meaningfully above the previous one
    Worsening,
    /// No meaningful movement, or not enough data
    Stable,
}

/// Per-category aggregate statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryStats {
    /// Number of readings in the category
    pub total: usize,

    /// Number of those readings inside the target range
    pub within_target: usize,

    /// Mean value, rounded to the nearest integer; 0 with no readings
    pub average: i64,
}

/// Aggregate statistics grouped by reading category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// Statistics for fasting readings
    pub fasting: CategoryStats,

    /// Statistics for post-meal readings
    pub post_meal: CategoryStats,

    /// Statistics for random readings
    pub random: CategoryStats,
}

impl CategoryBreakdown {
    /// Statistics for a category
    pub fn get(&self, category: ReadingCategory) -> CategoryStats {
        match category {
            ReadingCategory::Fasting => self.fasting,
            ReadingCategory::PostMeal => self.post_meal,
            ReadingCategory::Random => self.random,
        }
    }

    /// Mutable statistics for a category
    pub fn get_mut(&mut self, category: ReadingCategory) -> &mut CategoryStats {
        match category {
            ReadingCategory::Fasting => &mut self.fasting,
            ReadingCategory::PostMeal => &mut self.post_meal,
            ReadingCategory::Random => &mut self.random,
        }
    }
}

/// Analysis of a window of glucose readings against the patient's targets
#[derive(Debug, Clone, Serialize, Deserialize)]
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

    /// Short-term trend over the most recent readings
    pub recent_trend: GlucoseTrend,

    /// Advisory messages in rule-evaluation order
    pub recommendations: Vec<String>,
}

/// Composite result returned to analysis callers
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The patient's resolved target configuration
    pub targets: GlucoseTargets,

    /// The computed analysis
    pub analysis: GlucoseAnalysis,

    /// Human-readable window label, e.g. "30 days"
    pub period: String,
}

/// Partial update of a patient's target configuration.
/// Absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTargetsRequest {
    /// New lower bound for fasting readings
    pub fasting_min: Option<f64>,
    /// New upper bound for fasting readings
    pub fasting_max: Option<f64>,
    /// New lower bound for post-meal readings
    pub post_meal_min: Option<f64>,
    /// New upper bound for post-meal readings
    pub post_meal_max: Option<f64>,
    /// New lower bound for random readings
    pub random_min: Option<f64>,
    /// New upper bound for random readings
    pub random_max: Option<f64>,
    /// New measurement unit
    pub unit: Option<String>,
    /// New free-text notes
    pub notes: Option<String>,
}

/// Update of a patient's reminder settings.
/// The enabled flag always replaces the stored value; times and days are
/// replaced only when provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSettingsUpdate {
    /// Whether measurement reminders are enabled
    pub reminder_enabled: bool,

    /// Replacement reminder schedule
    pub reminder_times: Option<Vec<ReminderTime>>,

    /// Replacement weekday names
    pub reminder_days: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_fallback() {
        assert_eq!(ReadingCategory::parse(Some("fasting")), ReadingCategory::Fasting);
        assert_eq!(ReadingCategory::parse(Some("post_meal")), ReadingCategory::PostMeal);
        assert_eq!(ReadingCategory::parse(Some("random")), ReadingCategory::Random);
        assert_eq!(ReadingCategory::parse(Some("bedtime")), ReadingCategory::Random);
        assert_eq!(ReadingCategory::parse(None), ReadingCategory::Random);
    }

    #[test]
    fn test_category_default_is_random() {
        assert_eq!(ReadingCategory::default(), ReadingCategory::Random);
    }

    #[test]
    fn test_target_range_contains_is_inclusive() {
        let range = TargetRange { min: 70.0, max: 100.0 };
        assert!(range.contains(70.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(69.9));
        assert!(!range.contains(100.1));
    }

    #[test]
    fn test_target_range_validity() {
        assert!(TargetRange { min: 70.0, max: 100.0 }.is_valid());
        assert!(!TargetRange { min: 100.0, max: 100.0 }.is_valid());
        assert!(!TargetRange { min: 110.0, max: 100.0 }.is_valid());
    }
}
