use crate::entities::glucose::{
    GlucoseReading, GlucoseTargets, ReadingCategory, ReminderTime, TargetRange,
};

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for a target configuration
pub fn convert_to_domain_targets(
    data: gluco_track_data::models::glucose::GlucoseTargets,
) -> GlucoseTargets {
    GlucoseTargets {
        id: data.id,
        patient_id: data.patient_id,
        fasting: TargetRange {
            min: data.fasting_min,
            max: data.fasting_max,
        },
        post_meal: TargetRange {
            min: data.post_meal_min,
            max: data.post_meal_max,
        },
        random: TargetRange {
            min: data.random_min,
            max: data.random_max,
        },
        unit: data.unit,
        notes: data.notes,
        reminder_enabled: data.reminder_enabled,
        reminder_times: data
            .reminder_times
            .into_iter()
            .map(|t| ReminderTime {
                category: ReadingCategory::parse(Some(&t.category)),
                time: t.time,
                enabled: t.enabled,
            })
            .collect(),
        reminder_days: data.reminder_days,
        updated_at: data.updated_at,
    }
}

/// Convert from domain entity to data model for a target configuration
pub fn convert_to_data_targets(
    domain: &GlucoseTargets,
) -> gluco_track_data::models::glucose::GlucoseTargets {
    gluco_track_data::models::glucose::GlucoseTargets {
        id: domain.id.clone(),
        patient_id: domain.patient_id.clone(),
        fasting_min: domain.fasting.min,
        fasting_max: domain.fasting.max,
        post_meal_min: domain.post_meal.min,
        post_meal_max: domain.post_meal.max,
        random_min: domain.random.min,
        random_max: domain.random.max,
        unit: domain.unit.clone(),
        notes: domain.notes.clone(),
        reminder_enabled: domain.reminder_enabled,
        reminder_times: domain
            .reminder_times
            .iter()
            .map(|t| gluco_track_data::models::glucose::ReminderTime {
                time: t.time.clone(),
                category: t.category.as_str().to_string(),
                enabled: t.enabled,
            })
            .collect(),
        reminder_days: domain.reminder_days.clone(),
        updated_at: domain.updated_at.clone(),
    }
}

/// Convert from data model to domain entity for a glucose reading.
/// Missing or unrecognized categories resolve to `Random` here, so the
/// rest of the engine never sees a raw category string.
pub fn convert_to_domain_reading(
    data: gluco_track_data::models::glucose::GlucoseReading,
) -> GlucoseReading {
    GlucoseReading {
        id: data.id,
        value: data.value,
        category: ReadingCategory::parse(data.category.as_deref()),
        timestamp: data.timestamp,
    }
}
