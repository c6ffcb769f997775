use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for a patient's glucose target configuration.
/// At most one row exists per patient; the `patient_id` column is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlucoseTargets {
    /// Unique identifier for the configuration
    pub id: String,

    /// Patient this configuration belongs to
    pub patient_id: String,

    /// Lower bound for fasting readings (mg/dL)
    pub fasting_min: f64,

    /// Upper bound for fasting readings (mg/dL)
    pub fasting_max: f64,

    /// Lower bound for post-meal readings (mg/dL)
    pub post_meal_min: f64,

    /// Upper bound for post-meal readings (mg/dL)
    pub post_meal_max: f64,

    /// Lower bound for random readings (mg/dL)
    pub random_min: f64,

    /// Upper bound for random readings (mg/dL)
    pub random_max: f64,

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

/// A single scheduled measurement reminder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderTime {
    /// Time of day in "HH:MM" format
    pub time: String,

    /// Reading category the reminder is for ("fasting", "post_meal", "random")
    pub category: String,

    /// Whether this individual reminder is active
    pub enabled: bool,
}

impl GlucoseTargets {
    /// Build a configuration with the clinical default ranges and the
    /// default reminder schedule for a patient that has none yet.
    pub fn with_defaults(patient_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            fasting_min: 70.0,
            fasting_max: 100.0,
            post_meal_min: 70.0,
            post_meal_max: 140.0,
            random_min: 70.0,
            random_max: 125.0,
            unit: "mg/dL".to_string(),
            notes: None,
            reminder_enabled: true,
            reminder_times: vec![
                ReminderTime {
                    time: "08:00".to_string(),
                    category: "fasting".to_string(),
                    enabled: true,
                },
                ReminderTime {
                    time: "14:00".to_string(),
                    category: "post_meal".to_string(),
                    enabled: true,
                },
                ReminderTime {
                    time: "20:00".to_string(),
                    category: "random".to_string(),
                    enabled: true,
                },
            ],
            reminder_days: [
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Storage model for a blood glucose reading.
/// Readings are owned by the health-data side of the portal; this crate
/// only reads them (plus a seeding insert for tests and demos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlucoseReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Patient the reading belongs to
    pub patient_id: String,

    /// Measured value in mg/dL
    pub value: f64,

    /// Reading category ("fasting", "post_meal", "random"); absent means random
    pub category: Option<String>,

    /// When the reading was taken
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_ranges() {
        let targets = GlucoseTargets::with_defaults("patient-1");

        assert_eq!(targets.patient_id, "patient-1");
        assert_eq!((targets.fasting_min, targets.fasting_max), (70.0, 100.0));
        assert_eq!((targets.post_meal_min, targets.post_meal_max), (70.0, 140.0));
        assert_eq!((targets.random_min, targets.random_max), (70.0, 125.0));
        assert!(targets.fasting_min < targets.fasting_max);
        assert!(targets.post_meal_min < targets.post_meal_max);
        assert!(targets.random_min < targets.random_max);
    }

    #[test]
    fn test_default_reminder_schedule() {
        let targets = GlucoseTargets::with_defaults("patient-1");

        assert!(targets.reminder_enabled);
        assert_eq!(targets.reminder_times.len(), 3);
        assert_eq!(targets.reminder_times[0].time, "08:00");
        assert_eq!(targets.reminder_times[0].category, "fasting");
        assert_eq!(targets.reminder_days.len(), 7);
        assert_eq!(targets.unit, "mg/dL");
    }
}
