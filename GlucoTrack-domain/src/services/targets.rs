use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::error;

use crate::entities::conversions;
use crate::entities::glucose::{
    GlucoseTargets, ReadingCategory, ReminderSettingsUpdate, UpdateTargetsRequest,
};
use gluco_track_data::repository::{GlucoseTargetRepositoryTrait, RepositoryError};

/// Glucose target service errors
#[derive(Debug, Error)]
pub enum GlucoseServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for glucose target service operations
#[async_trait]
pub trait GlucoseTargetServiceTrait {
    /// Get a patient's target configuration, creating the defaults when
    /// none exists yet
    async fn get_targets(&self, patient_id: &str) -> Result<GlucoseTargets, GlucoseServiceError>;

    /// Apply a partial update to a patient's target configuration.
    /// Missing configurations start from the defaults; every merged range
    /// must keep its minimum strictly below its maximum.
    async fn update_targets(
        &self,
        patient_id: &str,
        update: UpdateTargetsRequest,
    ) -> Result<GlucoseTargets, GlucoseServiceError>;

    /// Update a patient's reminder settings.
    /// Fails with NotFound when the patient has no configuration yet.
    async fn update_reminders(
        &self,
        patient_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<GlucoseTargets, GlucoseServiceError>;
}

/// Glucose target service for domain logic
pub struct GlucoseTargetService<R: GlucoseTargetRepositoryTrait> {
    repository: R,
}

impl<R: GlucoseTargetRepositoryTrait> GlucoseTargetService<R> {
    /// Create a new glucose target service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> GlucoseServiceError {
        match err {
            RepositoryError::NotFound(msg) => GlucoseServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => GlucoseServiceError::ValidationError(msg),
            _ => GlucoseServiceError::RepositoryError(err.to_string()),
        }
    }
}

/// Merge a partial update onto an existing configuration, then check
/// every resulting range. The check runs on the merged values, so a
/// request touching only one bound is still validated against the
/// stored other bound.
fn apply_update(
    targets: &mut GlucoseTargets,
    update: &UpdateTargetsRequest,
) -> Result<(), GlucoseServiceError> {
    if let Some(min) = update.fasting_min {
        targets.fasting.min = min;
    }
    if let Some(max) = update.fasting_max {
        targets.fasting.max = max;
    }
    if let Some(min) = update.post_meal_min {
        targets.post_meal.min = min;
    }
    if let Some(max) = update.post_meal_max {
        targets.post_meal.max = max;
    }
    if let Some(min) = update.random_min {
        targets.random.min = min;
    }
    if let Some(max) = update.random_max {
        targets.random.max = max;
    }
    if let Some(unit) = &update.unit {
        targets.unit = unit.clone();
    }
    if let Some(notes) = &update.notes {
        targets.notes = Some(notes.clone());
    }

    for category in ReadingCategory::ALL {
        if !targets.range_for(category).is_valid() {
            return Err(GlucoseServiceError::ValidationError(format!(
                "Minimum values must be less than maximum values ({} range)",
                category.as_str()
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl<R: GlucoseTargetRepositoryTrait + Send + Sync> GlucoseTargetServiceTrait
    for GlucoseTargetService<R>
{
    async fn get_targets(&self, patient_id: &str) -> Result<GlucoseTargets, GlucoseServiceError> {
        let data_targets = self
            .repository
            .get_or_create(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_targets(data_targets))
    }

    async fn update_targets(
        &self,
        patient_id: &str,
        update: UpdateTargetsRequest,
    ) -> Result<GlucoseTargets, GlucoseServiceError> {
        // Merge onto the stored configuration, or onto an unsaved default
        // one. Nothing is written until the merged ranges validate, so a
        // rejected update leaves an unconfigured patient unconfigured.
        let data_targets = self
            .repository
            .find_by_patient(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .unwrap_or_else(|| {
                gluco_track_data::models::glucose::GlucoseTargets::with_defaults(patient_id)
            });

        let mut targets = conversions::convert_to_domain_targets(data_targets);
        apply_update(&mut targets, &update)?;
        targets.updated_at = Utc::now().to_rfc3339();

        let saved = self
            .repository
            .save(conversions::convert_to_data_targets(&targets))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_targets(saved))
    }

    async fn update_reminders(
        &self,
        patient_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<GlucoseTargets, GlucoseServiceError> {
        let data_targets = self
            .repository
            .find_by_patient(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                GlucoseServiceError::NotFound(format!(
                    "No glucose targets found for patient {}",
                    patient_id
                ))
            })?;

        let mut targets = conversions::convert_to_domain_targets(data_targets);

        // The enabled flag always replaces the stored value; the schedule
        // fields only change when the caller provides them.
        targets.reminder_enabled = update.reminder_enabled;
        if let Some(times) = update.reminder_times {
            targets.reminder_times = times;
        }
        if let Some(days) = update.reminder_days {
            targets.reminder_days = days;
        }
        targets.updated_at = Utc::now().to_rfc3339();

        let saved = self
            .repository
            .save(conversions::convert_to_data_targets(&targets))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_targets(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::glucose::ReminderTime;
    use gluco_track_data::repository::target_mocks::MockGlucoseTargetRepository;

    fn service() -> GlucoseTargetService<MockGlucoseTargetRepository> {
        GlucoseTargetService::new(MockGlucoseTargetRepository::new())
    }

    #[tokio::test]
    async fn test_get_targets_creates_defaults() {
        let service = service();

        let targets = service.get_targets("patient-1").await.unwrap();
        assert_eq!(targets.fasting.min, 70.0);
        assert_eq!(targets.fasting.max, 100.0);
        assert_eq!(targets.post_meal.max, 140.0);
        assert_eq!(targets.random.max, 125.0);
        assert!(targets.reminder_enabled);
        assert_eq!(targets.reminder_times.len(), 3);
        assert_eq!(targets.reminder_days.len(), 7);
    }

    #[tokio::test]
    async fn test_get_targets_is_idempotent() {
        let service = service();

        let first = service.get_targets("patient-1").await.unwrap();
        let second = service.get_targets("patient-1").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_targets_merges_partial_update() {
        let service = service();

        let update = UpdateTargetsRequest {
            fasting_max: Some(110.0),
            notes: Some("post-checkup adjustment".to_string()),
            ..Default::default()
        };
        let targets = service.update_targets("patient-1", update).await.unwrap();

        // updated fields change, everything else keeps its default
        assert_eq!(targets.fasting.max, 110.0);
        assert_eq!(targets.fasting.min, 70.0);
        assert_eq!(targets.post_meal.max, 140.0);
        assert_eq!(targets.notes.as_deref(), Some("post-checkup adjustment"));
    }

    #[tokio::test]
    async fn test_update_targets_rejects_inverted_range() {
        let service = service();

        let update = UpdateTargetsRequest {
            fasting_min: Some(120.0),
            ..Default::default()
        };
        let err = service.update_targets("patient-1", update).await.unwrap_err();
        match err {
            GlucoseServiceError::ValidationError(msg) => {
                assert!(msg.contains("fasting"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_targets_rejects_equal_bounds() {
        let service = service();

        let update = UpdateTargetsRequest {
            random_min: Some(125.0),
            ..Default::default()
        };
        assert!(service.update_targets("patient-1", update).await.is_err());
    }

    #[tokio::test]
    async fn test_update_targets_creates_when_absent() {
        let service = service();

        let update = UpdateTargetsRequest {
            post_meal_max: Some(150.0),
            ..Default::default()
        };
        let targets = service.update_targets("new-patient", update).await.unwrap();
        assert_eq!(targets.post_meal.max, 150.0);

        let fetched = service.get_targets("new-patient").await.unwrap();
        assert_eq!(fetched.post_meal.max, 150.0);
    }

    #[tokio::test]
    async fn test_rejected_update_persists_nothing() {
        let repository = MockGlucoseTargetRepository::new();
        let service = GlucoseTargetService::new(repository.clone());

        let update = UpdateTargetsRequest {
            fasting_min: Some(120.0),
            ..Default::default()
        };
        assert!(service.update_targets("patient-x", update).await.is_err());

        // the failed update must not have created a default configuration
        let stored = repository.find_by_patient("patient-x").await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_update_reminders_requires_existing_config() {
        let service = service();

        let update = ReminderSettingsUpdate {
            reminder_enabled: false,
            reminder_times: None,
            reminder_days: None,
        };
        let err = service.update_reminders("patient-1", update).await.unwrap_err();
        assert!(matches!(err, GlucoseServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_reminders_partial_schedule() {
        let service = service();
        service.get_targets("patient-1").await.unwrap();

        let update = ReminderSettingsUpdate {
            reminder_enabled: false,
            reminder_times: Some(vec![ReminderTime {
                time: "07:30".to_string(),
                category: ReadingCategory::Fasting,
                enabled: true,
            }]),
            reminder_days: None,
        };
        let targets = service.update_reminders("patient-1", update).await.unwrap();

        assert!(!targets.reminder_enabled);
        assert_eq!(targets.reminder_times.len(), 1);
        assert_eq!(targets.reminder_times[0].time, "07:30");
        // days untouched when not provided
        assert_eq!(targets.reminder_days.len(), 7);
    }
}
