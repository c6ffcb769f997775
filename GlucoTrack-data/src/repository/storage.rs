use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::glucose::{GlucoseReading, GlucoseTargets, ReminderTime};

/// Database storage operations for glucose targets and readings
pub struct DatabaseStorage;

/// Row shape before the JSON reminder columns are decoded
type TargetsRow = (GlucoseTargets, String, String);

#[cfg(feature = "sqlite")]
fn targets_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TargetsRow> {
    let targets = GlucoseTargets {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        fasting_min: row.get(2)?,
        fasting_max: row.get(3)?,
        post_meal_min: row.get(4)?,
        post_meal_max: row.get(5)?,
        random_min: row.get(6)?,
        random_max: row.get(7)?,
        unit: row.get(8)?,
        notes: row.get(9)?,
        reminder_enabled: row.get(10)?,
        reminder_times: Vec::new(),
        reminder_days: Vec::new(),
        updated_at: row.get(13)?,
    };
    let times_json: String = row.get(11)?;
    let days_json: String = row.get(12)?;
    Ok((targets, times_json, days_json))
}

fn decode_reminders(row: TargetsRow) -> Result<GlucoseTargets, RepositoryError> {
    let (mut targets, times_json, days_json) = row;
    targets.reminder_times = serde_json::from_str::<Vec<ReminderTime>>(&times_json)?;
    targets.reminder_days = serde_json::from_str::<Vec<String>>(&days_json)?;
    Ok(targets)
}

const TARGETS_COLUMNS: &str = "id, patient_id, fasting_min, fasting_max, post_meal_min, \
     post_meal_max, random_min, random_max, unit, notes, reminder_enabled, \
     reminder_times, reminder_days, updated_at";

impl DatabaseStorage {
    /// Look up a patient's target configuration
    #[cfg(feature = "sqlite")]
    pub async fn find_targets(
        pool: &DatabasePool,
        patient_id: &str,
    ) -> Result<Option<GlucoseTargets>, RepositoryError> {
        debug!("Getting glucose targets from database: patient={}", patient_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM glucose_targets WHERE patient_id = ?",
                    TARGETS_COLUMNS
                ))?;

                let row = stmt.query_row([patient_id], targets_from_row);

                match row {
                    Ok(row) => Ok(Some(decode_reminders(row)?)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(RepositoryError::Sqlite(e)),
                }
            }
        }
    }

    /// Get a patient's configuration, inserting the defaults if none exists.
    /// The insert is conflict-tolerant on the unique patient_id column, so
    /// concurrent first accesses resolve to a single stored row.
    #[cfg(feature = "sqlite")]
    pub async fn get_or_create_targets(
        pool: &DatabasePool,
        patient_id: &str,
    ) -> Result<GlucoseTargets, RepositoryError> {
        debug!(
            "Getting or creating glucose targets in database: patient={}",
            patient_id
        );

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let defaults = GlucoseTargets::with_defaults(patient_id);
                let times_json = serde_json::to_string(&defaults.reminder_times)?;
                let days_json = serde_json::to_string(&defaults.reminder_days)?;

                conn.execute(
                    "INSERT INTO glucose_targets
                     (id, patient_id, fasting_min, fasting_max, post_meal_min,
                      post_meal_max, random_min, random_max, unit, notes,
                      reminder_enabled, reminder_times, reminder_days, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                     ON CONFLICT(patient_id) DO NOTHING",
                    rusqlite::params![
                        defaults.id,
                        defaults.patient_id,
                        defaults.fasting_min,
                        defaults.fasting_max,
                        defaults.post_meal_min,
                        defaults.post_meal_max,
                        defaults.random_min,
                        defaults.random_max,
                        defaults.unit,
                        defaults.notes,
                        defaults.reminder_enabled,
                        times_json,
                        days_json,
                        defaults.updated_at,
                    ],
                )?;

                // Read back whichever row won the insert
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM glucose_targets WHERE patient_id = ?",
                    TARGETS_COLUMNS
                ))?;
                let row = stmt.query_row([patient_id], targets_from_row)?;
                decode_reminders(row)
            }
        }
    }

    /// Store a target configuration, replacing any existing row for the patient
    #[cfg(feature = "sqlite")]
    pub async fn save_targets(
        pool: &DatabasePool,
        targets: &GlucoseTargets,
    ) -> Result<(), RepositoryError> {
        debug!(
            "Saving glucose targets in database: patient={}",
            targets.patient_id
        );

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let times_json = serde_json::to_string(&targets.reminder_times)?;
                let days_json = serde_json::to_string(&targets.reminder_days)?;

                conn.execute(
                    "INSERT INTO glucose_targets
                     (id, patient_id, fasting_min, fasting_max, post_meal_min,
                      post_meal_max, random_min, random_max, unit, notes,
                      reminder_enabled, reminder_times, reminder_days, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                     ON CONFLICT(patient_id) DO UPDATE SET
                        fasting_min = excluded.fasting_min,
                        fasting_max = excluded.fasting_max,
                        post_meal_min = excluded.post_meal_min,
                        post_meal_max = excluded.post_meal_max,
                        random_min = excluded.random_min,
                        random_max = excluded.random_max,
                        unit = excluded.unit,
                        notes = excluded.notes,
                        reminder_enabled = excluded.reminder_enabled,
                        reminder_times = excluded.reminder_times,
                        reminder_days = excluded.reminder_days,
                        updated_at = excluded.updated_at",
                    rusqlite::params![
                        targets.id,
                        targets.patient_id,
                        targets.fasting_min,
                        targets.fasting_max,
                        targets.post_meal_min,
                        targets.post_meal_max,
                        targets.random_min,
                        targets.random_max,
                        targets.unit,
                        targets.notes,
                        targets.reminder_enabled,
                        times_json,
                        days_json,
                        targets.updated_at,
                    ],
                )?;

                Ok(())
            }
        }
    }

    /// Store a glucose reading
    #[cfg(feature = "sqlite")]
    pub async fn store_reading(
        pool: &DatabasePool,
        reading: &GlucoseReading,
    ) -> Result<(), RepositoryError> {
        debug!("Storing glucose reading in database: id={}", reading.id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                conn.execute(
                    "INSERT INTO glucose_readings
                     (id, patient_id, value, category, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![
                        reading.id,
                        reading.patient_id,
                        reading.value,
                        reading.category,
                        reading.timestamp,
                    ],
                )?;

                Ok(())
            }
        }
    }

    /// Get a patient's readings dated at or after `since`, newest first
    #[cfg(feature = "sqlite")]
    pub async fn list_readings(
        pool: &DatabasePool,
        patient_id: &str,
        since: Option<&str>,
    ) -> Result<Vec<GlucoseReading>, RepositoryError> {
        debug!(
            "Getting glucose readings from database: patient={}",
            patient_id
        );

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut query = String::from(
                    "SELECT id, patient_id, value, category, timestamp
                     FROM glucose_readings WHERE patient_id = ?",
                );

                let since_string: Option<String> = since.map(|s| s.to_string());
                let mut params: Vec<&dyn rusqlite::ToSql> = vec![&patient_id as &dyn rusqlite::ToSql];

                if let Some(ref since) = since_string {
                    query.push_str(" AND timestamp >= ?");
                    params.push(since as &dyn rusqlite::ToSql);
                }

                query.push_str(" ORDER BY timestamp DESC");

                let mut stmt = conn.prepare(&query)?;

                let readings = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
                    Ok(GlucoseReading {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        value: row.get(2)?,
                        category: row.get(3)?,
                        timestamp: row.get(4)?,
                    })
                })?;

                let mut result = Vec::new();
                for reading in readings {
                    result.push(reading?);
                }

                Ok(result)
            }
        }
    }
}
