use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;
use crate::database::get_db_pool;
use crate::models::glucose::GlucoseReading;

/// Repository trait for the health-data reading source.
/// The analysis engine only consumes readings; `record_reading` exists so
/// deployments and tests can seed data.
#[async_trait]
pub trait HealthDataRepositoryTrait {
    /// Get a patient's glucose readings dated at or after `since`,
    /// ordered descending by date (most recent first)
    async fn list_glucose_readings(
        &self,
        patient_id: &str,
        since: Option<String>,
    ) -> Result<Vec<GlucoseReading>, RepositoryError>;

    /// Store a glucose reading
    async fn record_reading(
        &self,
        reading: GlucoseReading,
    ) -> Result<GlucoseReading, RepositoryError>;
}

/// Repository for glucose readings.
/// Uses the SQLite database when available, with in-memory fallback.
#[derive(Debug, Clone, Default)]
pub struct HealthDataRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl HealthDataRepository {
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
impl HealthDataRepositoryTrait for HealthDataRepository {
    async fn list_glucose_readings(
        &self,
        patient_id: &str,
        since: Option<String>,
    ) -> Result<Vec<GlucoseReading>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting glucose readings from database: patient={}", patient_id);
                match DatabaseStorage::list_readings(&pool, patient_id, since.as_deref()).await {
                    Ok(readings) => Ok(readings),
                    Err(e) => {
                        error!("Failed to get glucose readings from database: {}", e);
                        self.storage.list_readings(patient_id, since.as_deref()).await
                    }
                }
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for list_glucose_readings",
                    e
                );
                self.storage.list_readings(patient_id, since.as_deref()).await
            }
        }
    }

    async fn record_reading(
        &self,
        mut reading: GlucoseReading,
    ) -> Result<GlucoseReading, RepositoryError> {
        if reading.id.is_empty() {
            reading.id = Uuid::new_v4().to_string();
        }

        match get_db_pool() {
            Ok(pool) => {
                debug!("Storing glucose reading in database: id={}", reading.id);
                match DatabaseStorage::store_reading(&pool, &reading).await {
                    Ok(_) => Ok(reading),
                    Err(e) => {
                        error!("Failed to store glucose reading in database: {}", e);
                        self.storage.store_reading(&reading).await
                    }
                }
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_reading(&reading).await
            }
        }
    }
}

/// Mock reading source for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock implementation of the reading source for testing.
    /// Returns its preloaded readings, newest first, honoring `since`.
    #[derive(Debug, Clone, Default)]
    pub struct MockHealthDataRepository {
        readings: Arc<Mutex<Vec<GlucoseReading>>>,
    }

    impl MockHealthDataRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                readings: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Create a mock repository with predefined readings
        pub fn with_readings(readings: Vec<GlucoseReading>) -> Self {
            Self {
                readings: Arc::new(Mutex::new(readings)),
            }
        }
    }

    #[async_trait]
    impl HealthDataRepositoryTrait for MockHealthDataRepository {
        async fn list_glucose_readings(
            &self,
            patient_id: &str,
            since: Option<String>,
        ) -> Result<Vec<GlucoseReading>, RepositoryError> {
            let mut readings: Vec<GlucoseReading> = self
                .readings
                .lock()
                .unwrap()
                .iter()
                .filter(|r| {
                    r.patient_id == patient_id
                        && since
                            .as_deref()
                            .map_or(true, |since| r.timestamp.as_str() >= since)
                })
                .cloned()
                .collect();

            readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

            Ok(readings)
        }

        async fn record_reading(
            &self,
            reading: GlucoseReading,
        ) -> Result<GlucoseReading, RepositoryError> {
            self.readings.lock().unwrap().push(reading.clone());
            Ok(reading)
        }
    }
}
