pub mod analysis;
pub mod classification;
pub mod recommendations;
pub mod targets;
pub mod trend;

// Domain services
// This module contains business logic implementations.

use gluco_track_data::repository::{
    GlucoseTargetRepository, HealthDataRepository, InMemoryStorage,
};

// Re-export service traits and factory functions
pub use analysis::{analyze, GlucoseAnalysisService, GlucoseAnalysisServiceTrait};
pub use targets::{GlucoseServiceError, GlucoseTargetService, GlucoseTargetServiceTrait};

/// Create the default glucose services backed by the shared data layer.
///
/// Built together so that when the database is unavailable both services
/// fall back to the same in-memory storage; targets written through one
/// are visible to the other.
pub fn create_default_glucose_services() -> (
    impl GlucoseTargetServiceTrait + Send + Sync,
    impl GlucoseAnalysisServiceTrait + Send + Sync,
) {
    let storage = InMemoryStorage::new();
    let target_repository = GlucoseTargetRepository::with_storage(storage.clone());
    let analysis_target_repository = GlucoseTargetRepository::with_storage(storage.clone());
    let health_data_repository = HealthDataRepository::with_storage(storage);

    (
        GlucoseTargetService::new(target_repository),
        GlucoseAnalysisService::new(analysis_target_repository, health_data_repository),
    )
}

/// Create mock glucose services for testing
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_glucose_services() -> (
    impl GlucoseTargetServiceTrait + Send + Sync,
    impl GlucoseAnalysisServiceTrait + Send + Sync,
) {
    crate::testing::mock_glucose_services()
}
