use async_trait::async_trait;
use tracing::{debug, error};

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;
use crate::database::get_db_pool;
use crate::models::glucose::GlucoseTargets;

/// Repository trait for glucose target configurations
#[async_trait]
pub trait GlucoseTargetRepositoryTrait {
    /// Look up a patient's target configuration
    async fn find_by_patient(
        &self,
        patient_id: &str,
    ) -> Result<Option<GlucoseTargets>, RepositoryError>;

    /// Get a patient's configuration, creating the defaults if none exists.
    /// Implementations must be atomic under concurrent first access: two
    /// callers may never end up with two configurations for one patient.
    async fn get_or_create(&self, patient_id: &str) -> Result<GlucoseTargets, RepositoryError>;

    /// Persist a configuration, replacing any existing one for the patient
    async fn save(&self, targets: GlucoseTargets) -> Result<GlucoseTargets, RepositoryError>;
}

/// Repository for glucose target configurations.
/// Uses the SQLite database when available, with in-memory fallback.
#[derive(Debug, Clone, Default)]
pub struct GlucoseTargetRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl GlucoseTargetRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Create a repository sharing the given in-memory storage
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl GlucoseTargetRepositoryTrait for GlucoseTargetRepository {
    async fn find_by_patient(
        &self,
        patient_id: &str,
    ) -> Result<Option<GlucoseTargets>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting glucose targets from database: patient={}", patient_id);
                match DatabaseStorage::find_targets(&pool, patient_id).await {
                    Ok(targets) => Ok(targets),
                    Err(e) => {
                        error!("Failed to get glucose targets from database: {}", e);
                        self.storage.find_targets(patient_id).await
                    }
                }
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.find_targets(patient_id).await
            }
        }
    }

    async fn get_or_create(&self, patient_id: &str) -> Result<GlucoseTargets, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!(
                    "Getting or creating glucose targets in database: patient={}",
                    patient_id
                );
                match DatabaseStorage::get_or_create_targets(&pool, patient_id).await {
                    Ok(targets) => Ok(targets),
                    Err(e) => {
                        error!("Failed to get or create glucose targets in database: {}", e);
                        self.storage.get_or_create_targets(patient_id).await
                    }
                }
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for get_or_create",
                    e
                );
                self.storage.get_or_create_targets(patient_id).await
            }
        }
    }

    async fn save(&self, targets: GlucoseTargets) -> Result<GlucoseTargets, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!(
                    "Saving glucose targets in database: patient={}",
                    targets.patient_id
                );
                match DatabaseStorage::save_targets(&pool, &targets).await {
                    Ok(_) => Ok(targets),
                    Err(e) => {
                        error!("Failed to save glucose targets in database: {}", e);
                        self.storage.save_targets(&targets).await
                    }
                }
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for save",
                    e
                );
                self.storage.save_targets(&targets).await
            }
        }
    }
}

/// Mock glucose target repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock implementation of GlucoseTargetRepository for testing.
    /// Never touches the database; everything lives behind one mutex.
    /// Clones share the same store so services under test see one another's writes.
    #[derive(Debug, Clone, Default)]
    pub struct MockGlucoseTargetRepository {
        targets: Arc<Mutex<HashMap<String, GlucoseTargets>>>,
    }

    impl MockGlucoseTargetRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                targets: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        /// Create a mock repository with a predefined configuration
        pub fn with_targets(targets: GlucoseTargets) -> Self {
            let repo = Self::new();
            repo.targets
                .lock()
                .unwrap()
                .insert(targets.patient_id.clone(), targets);
            repo
        }
    }

    #[async_trait]
    impl GlucoseTargetRepositoryTrait for MockGlucoseTargetRepository {
        async fn find_by_patient(
            &self,
            patient_id: &str,
        ) -> Result<Option<GlucoseTargets>, RepositoryError> {
            Ok(self.targets.lock().unwrap().get(patient_id).cloned())
        }

        async fn get_or_create(
            &self,
            patient_id: &str,
        ) -> Result<GlucoseTargets, RepositoryError> {
            let mut store = self.targets.lock().unwrap();
            let targets = store
                .entry(patient_id.to_string())
                .or_insert_with(|| GlucoseTargets::with_defaults(patient_id));
            Ok(targets.clone())
        }

        async fn save(&self, targets: GlucoseTargets) -> Result<GlucoseTargets, RepositoryError> {
            self.targets
                .lock()
                .unwrap()
                .insert(targets.patient_id.clone(), targets.clone());
            Ok(targets)
        }
    }
}
