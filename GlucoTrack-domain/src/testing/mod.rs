// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use gluco_track_data::repository::reading_mocks::MockHealthDataRepository;
pub use gluco_track_data::repository::target_mocks::MockGlucoseTargetRepository;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::services::{
    GlucoseAnalysisService, GlucoseAnalysisServiceTrait, GlucoseTargetService,
    GlucoseTargetServiceTrait,
};
use gluco_track_data::models::glucose::{GlucoseReading, GlucoseTargets};

/// Shared mock backend for building services under test.
/// Both repositories are clones over the same stores, so targets created
/// through the target service are visible to the analysis service.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Target configuration store
    pub targets: MockGlucoseTargetRepository,
    /// Reading store
    pub readings: MockHealthDataRepository,
}

impl MockBackend {
    /// Create an empty mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a target configuration
    pub fn with_targets(targets: GlucoseTargets) -> Self {
        Self {
            targets: MockGlucoseTargetRepository::with_targets(targets),
            readings: MockHealthDataRepository::new(),
        }
    }

    /// Preload glucose readings
    pub fn with_readings(self, readings: Vec<GlucoseReading>) -> Self {
        Self {
            targets: self.targets,
            readings: MockHealthDataRepository::with_readings(readings),
        }
    }

    /// Build the target service over this backend
    pub fn target_service(&self) -> impl GlucoseTargetServiceTrait + Send + Sync {
        GlucoseTargetService::new(self.targets.clone())
    }

    /// Build the analysis service over this backend
    pub fn analysis_service(&self) -> impl GlucoseAnalysisServiceTrait + Send + Sync {
        GlucoseAnalysisService::new(self.targets.clone(), self.readings.clone())
    }
}

/// Create both glucose services over a fresh shared mock backend
pub fn mock_glucose_services() -> (
    impl GlucoseTargetServiceTrait + Send + Sync,
    impl GlucoseAnalysisServiceTrait + Send + Sync,
) {
    let backend = MockBackend::new();
    (backend.target_service(), backend.analysis_service())
}

/// A glucose reading taken `days_ago` days before now
pub fn sample_reading(patient_id: &str, value: f64, category: &str, days_ago: i64) -> GlucoseReading {
    GlucoseReading {
        id: Uuid::new_v4().to_string(),
        patient_id: patient_id.to_string(),
        value,
        category: Some(category.to_string()),
        timestamp: (Utc::now() - Duration::days(days_ago)).to_rfc3339(),
    }
}
