//! Domain layer health check functionality
//! This module provides health check services for the application

use gluco_track_data::database;
use std::collections::HashMap;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// A health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Check if the database is available.
///
/// Ok(true) when a pool is initialized and reachable, Ok(false) when the
/// service is running on the in-memory fallback, Err when no storage is
/// usable at all.
pub async fn check_database_status() -> Result<bool, String> {
    match database::get_connection_info() {
        Some(_) => Ok(true),
        None => match database::get_db_pool() {
            Ok(_) => Ok(true),
            // No pool means the repositories serve from in-memory storage
            Err(database::DatabaseError::PoolNotInitialized) => Ok(false),
            Err(e) => Err(format!("Database connection error: {}", e)),
        },
    }
}

/// Get overall system health
pub async fn get_system_health() -> SystemHealth {
    let db_status = check_database_status().await;

    let db_component = match db_status {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: database::get_connection_info(),
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Running on in-memory storage".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let overall_status = match db_component.status {
        ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        ComponentStatus::Degraded => SystemStatus::Degraded,
        ComponentStatus::Healthy => SystemStatus::Healthy,
    };

    SystemHealth {
        status: overall_status,
        components: vec![("database".to_string(), db_component)]
            .into_iter()
            .collect(),
    }
}
