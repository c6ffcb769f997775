use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::RepositoryError;
use crate::models::glucose::{GlucoseReading, GlucoseTargets};

/// In-memory storage for glucose targets and readings, used when the
/// database is not available and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    /// Target configurations keyed by patient id
    targets: Arc<Mutex<HashMap<String, GlucoseTargets>>>,
    /// Stored glucose readings
    readings: Arc<Mutex<Vec<GlucoseReading>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            targets: Arc::new(Mutex::new(HashMap::new())),
            readings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Look up a patient's target configuration
    pub async fn find_targets(
        &self,
        patient_id: &str,
    ) -> Result<Option<GlucoseTargets>, RepositoryError> {
        let store = self
            .targets
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.get(patient_id).cloned())
    }

    /// Get a patient's configuration, creating the defaults if absent.
    /// Lookup and insert happen under a single lock acquisition, so two
    /// concurrent first accesses cannot both insert.
    pub async fn get_or_create_targets(
        &self,
        patient_id: &str,
    ) -> Result<GlucoseTargets, RepositoryError> {
        let mut store = self
            .targets
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let targets = store
            .entry(patient_id.to_string())
            .or_insert_with(|| GlucoseTargets::with_defaults(patient_id));
        Ok(targets.clone())
    }

    /// Store a target configuration, replacing any existing one for the patient
    pub async fn save_targets(
        &self,
        targets: &GlucoseTargets,
    ) -> Result<GlucoseTargets, RepositoryError> {
        let mut store = self
            .targets
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.insert(targets.patient_id.clone(), targets.clone());
        Ok(targets.clone())
    }

    /// Store a glucose reading
    pub async fn store_reading(
        &self,
        reading: &GlucoseReading,
    ) -> Result<GlucoseReading, RepositoryError> {
        let mut store = self
            .readings
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.push(reading.clone());
        Ok(reading.clone())
    }

    /// Get a patient's readings dated at or after `since`, newest first
    pub async fn list_readings(
        &self,
        patient_id: &str,
        since: Option<&str>,
    ) -> Result<Vec<GlucoseReading>, RepositoryError> {
        let store = self
            .readings
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;

        let mut readings: Vec<GlucoseReading> = store
            .iter()
            .filter(|reading| {
                if reading.patient_id != patient_id {
                    return false;
                }
                if let Some(since) = since {
                    if reading.timestamp.as_str() < since {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(patient_id: &str, value: f64, timestamp: &str) -> GlucoseReading {
        GlucoseReading {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            value,
            category: None,
            timestamp: timestamp.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let storage = InMemoryStorage::new();

        let first = storage.get_or_create_targets("patient-1").await.unwrap();
        let second = storage.get_or_create_targets("patient-1").await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_targets_missing() {
        let storage = InMemoryStorage::new();
        assert!(storage.find_targets("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_readings_sorted_and_filtered() {
        let storage = InMemoryStorage::new();
        storage
            .store_reading(&reading("p1", 95.0, "2026-08-01T08:00:00+00:00"))
            .await
            .unwrap();
        storage
            .store_reading(&reading("p1", 150.0, "2026-08-10T08:00:00+00:00"))
            .await
            .unwrap();
        storage
            .store_reading(&reading("p2", 110.0, "2026-08-05T08:00:00+00:00"))
            .await
            .unwrap();

        let readings = storage.list_readings("p1", None).await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].value, 150.0); // newest first

        let recent = storage
            .list_readings("p1", Some("2026-08-05T00:00:00+00:00"))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].value, 150.0);
    }
}
