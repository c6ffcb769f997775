use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_glucose_targets_table(conn)?;
    create_glucose_readings_table(conn)?;
    create_glucose_readings_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the glucose targets table.
/// The UNIQUE constraint on patient_id enforces at most one live
/// configuration per patient and is what the upsert in storage relies on.
fn create_glucose_targets_table(conn: &Connection) -> Result<(), String> {
    info!("Creating glucose_targets table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS glucose_targets (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL UNIQUE,
            fasting_min REAL NOT NULL,
            fasting_max REAL NOT NULL,
            post_meal_min REAL NOT NULL,
            post_meal_max REAL NOT NULL,
            random_min REAL NOT NULL,
            random_max REAL NOT NULL,
            unit TEXT NOT NULL DEFAULT 'mg/dL',
            notes TEXT,
            reminder_enabled INTEGER NOT NULL DEFAULT 1,
            reminder_times TEXT NOT NULL,
            reminder_days TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Create the glucose readings table
fn create_glucose_readings_table(conn: &Connection) -> Result<(), String> {
    info!("Creating glucose_readings table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS glucose_readings (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL,
            value REAL NOT NULL,
            category TEXT,
            timestamp TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index for per-patient, newest-first reading queries
fn create_glucose_readings_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on patient_id, timestamp");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_glucose_readings_patient_timestamp
        ON glucose_readings (patient_id, timestamp DESC)",
        [],
    )
    .map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
