use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Import domain entities and services
use gluco_track_domain::entities::glucose as domain;
use gluco_track_domain::entities::ReadingCategory;
use gluco_track_domain::services::{
    create_default_glucose_services, GlucoseAnalysisServiceTrait, GlucoseServiceError,
    GlucoseTargetServiceTrait,
};

// Import our entities
use crate::entities::glucose::{
    AnalysisResponse, CategoryBreakdown, CategoryStats, GlucoseAnalysis, GlucoseTargets,
    ReminderTime, TargetRange, TargetsUpdatedResponse, UpdateGlucoseTargetsRequest,
    UpdateReminderSettingsRequest,
};

/// Analysis window in days when the caller does not specify one
const DEFAULT_ANALYSIS_DAYS: u32 = 30;

/// Longest analysis window a caller may request
const MAX_ANALYSIS_DAYS: u32 = 365;

/// Query parameters for the glucose analysis endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AnalysisQueryParams {
    /// Analysis period in days (default: 30, max: 365)
    pub days: Option<u32>,
}

/// Error response format for API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Services the glucose handlers depend on
#[derive(Clone)]
pub struct GlucoseServices {
    /// Target configuration service
    pub targets: Arc<dyn GlucoseTargetServiceTrait + Send + Sync>,
    /// Analysis service
    pub analysis: Arc<dyn GlucoseAnalysisServiceTrait + Send + Sync>,
}

/// Create the default services for the handlers to use
pub fn create_services() -> GlucoseServices {
    let (targets, analysis) = create_default_glucose_services();
    GlucoseServices {
        targets: Arc::new(targets),
        analysis: Arc::new(analysis),
    }
}

/// Map a domain service error to an API error response
fn map_service_error(err: GlucoseServiceError, resource: &str) -> Response {
    match err {
        GlucoseServiceError::NotFound(msg) => {
            info!("{}", msg);
            ErrorResponse::not_found(resource).into_response()
        }
        GlucoseServiceError::ValidationError(msg) => {
            warn!("Validation failed: {}", msg);
            ErrorResponse::validation_error(&msg, None).into_response()
        }
        GlucoseServiceError::RepositoryError(msg) => {
            error!("Repository error: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}

/// Get a patient's glucose targets, creating the defaults on first access
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patient_id}/glucose/targets",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Glucose target configuration", body = GlucoseTargets),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(services))]
pub async fn get_glucose_targets(
    State(services): State<GlucoseServices>,
    Path(patient_id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching glucose targets for patient: {}", patient_id);

    match services.targets.get_targets(&patient_id).await {
        Ok(targets) => Ok((StatusCode::OK, Json(convert_to_public_targets(targets)))),
        Err(e) => Err(map_service_error(e, "glucose targets")),
    }
}

/// Update a patient's glucose targets
#[utoipa::path(
    put,
    path = "/api/v1/patients/{patient_id}/glucose/targets",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    request_body = UpdateGlucoseTargetsRequest,
    responses(
        (status = 200, description = "Glucose targets updated", body = TargetsUpdatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(services, request))]
pub async fn update_glucose_targets(
    State(services): State<GlucoseServices>,
    Path(patient_id): Path<String>,
    Json(request): Json<UpdateGlucoseTargetsRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating glucose targets for patient: {}", patient_id);

    if let Err(validation_errors) = request.validate() {
        warn!("Invalid glucose target payload: {}", validation_errors);
        return Err(ErrorResponse::validation_error(
            &validation_errors.to_string(),
            None,
        )
        .into_response());
    }

    let update = convert_to_domain_update(request);

    match services.targets.update_targets(&patient_id, update).await {
        Ok(targets) => Ok((
            StatusCode::OK,
            Json(TargetsUpdatedResponse {
                message: "Glucose targets updated successfully".to_string(),
                targets: convert_to_public_targets(targets),
            }),
        )),
        Err(e) => Err(map_service_error(e, "glucose targets")),
    }
}

/// Update a patient's measurement reminder settings
#[utoipa::path(
    put,
    path = "/api/v1/patients/{patient_id}/glucose/targets/reminders",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    request_body = UpdateReminderSettingsRequest,
    responses(
        (status = 200, description = "Reminder settings updated", body = TargetsUpdatedResponse),
        (status = 404, description = "No glucose targets configured yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(services, request))]
pub async fn update_reminder_settings(
    State(services): State<GlucoseServices>,
    Path(patient_id): Path<String>,
    Json(request): Json<UpdateReminderSettingsRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating reminder settings for patient: {}", patient_id);

    let update = convert_to_domain_reminder_update(request);

    match services.targets.update_reminders(&patient_id, update).await {
        Ok(targets) => Ok((
            StatusCode::OK,
            Json(TargetsUpdatedResponse {
                message: "Reminder settings updated successfully".to_string(),
                targets: convert_to_public_targets(targets),
            }),
        )),
        Err(e) => Err(map_service_error(e, "glucose targets")),
    }
}

/// Analyze a patient's recent glucose readings against their targets
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patient_id}/glucose/analysis",
    params(
        ("patient_id" = String, Path, description = "Patient identifier"),
        AnalysisQueryParams
    ),
    responses(
        (status = 200, description = "Glucose analysis report", body = AnalysisResponse),
        (status = 404, description = "No glucose targets configured yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(services))]
pub async fn get_glucose_analysis(
    State(services): State<GlucoseServices>,
    Path(patient_id): Path<String>,
    Query(params): Query<AnalysisQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let days = params
        .days
        .unwrap_or(DEFAULT_ANALYSIS_DAYS)
        .min(MAX_ANALYSIS_DAYS);
    info!(
        "Building glucose analysis for patient {} over {} days",
        patient_id, days
    );

    match services.analysis.build_report(&patient_id, days).await {
        Ok(report) => Ok((StatusCode::OK, Json(convert_to_public_report(report)))),
        Err(e) => Err(map_service_error(e, "glucose targets")),
    }
}

/// Convert a domain target configuration to its public representation
fn convert_to_public_targets(targets: domain::GlucoseTargets) -> GlucoseTargets {
    GlucoseTargets {
        id: targets.id,
        patient_id: targets.patient_id,
        fasting: convert_range(targets.fasting),
        post_meal: convert_range(targets.post_meal),
        random: convert_range(targets.random),
        unit: targets.unit,
        notes: targets.notes,
        reminder_enabled: targets.reminder_enabled,
        reminder_times: targets
            .reminder_times
            .into_iter()
            .map(|t| ReminderTime {
                time: t.time,
                category: t.category.as_str().to_string(),
                enabled: t.enabled,
            })
            .collect(),
        reminder_days: targets.reminder_days,
        updated_at: targets.updated_at,
    }
}

fn convert_range(range: domain::TargetRange) -> TargetRange {
    TargetRange {
        min: range.min,
        max: range.max,
    }
}

/// Convert a public update request to the domain request
fn convert_to_domain_update(request: UpdateGlucoseTargetsRequest) -> domain::UpdateTargetsRequest {
    domain::UpdateTargetsRequest {
        fasting_min: request.fasting_min,
        fasting_max: request.fasting_max,
        post_meal_min: request.post_meal_min,
        post_meal_max: request.post_meal_max,
        random_min: request.random_min,
        random_max: request.random_max,
        unit: request.unit,
        notes: request.notes,
    }
}

/// Convert a public reminder update to the domain request.
/// Unknown reminder categories resolve to the fallback category here.
fn convert_to_domain_reminder_update(
    request: UpdateReminderSettingsRequest,
) -> domain::ReminderSettingsUpdate {
    domain::ReminderSettingsUpdate {
        reminder_enabled: request.reminder_enabled,
        reminder_times: request.reminder_times.map(|times| {
            times
                .into_iter()
                .map(|t| domain::ReminderTime {
                    time: t.time,
                    category: ReadingCategory::parse(Some(&t.category)),
                    enabled: t.enabled,
                })
                .collect()
        }),
        reminder_days: request.reminder_days,
    }
}

fn convert_stats(stats: domain::CategoryStats) -> CategoryStats {
    CategoryStats {
        total: stats.total,
        within_target: stats.within_target,
        average: stats.average,
    }
}

/// Convert a domain analysis report to the public response shape
fn convert_to_public_report(report: domain::AnalysisReport) -> AnalysisResponse {
    let analysis = report.analysis;

    AnalysisResponse {
        targets: convert_to_public_targets(report.targets),
        analysis: GlucoseAnalysis {
            total_readings: analysis.total_readings,
            within_target: analysis.within_target,
            above_target: analysis.above_target,
            below_target: analysis.below_target,
            average_glucose: analysis.average_glucose,
            readings_by_category: CategoryBreakdown {
                fasting: convert_stats(analysis.readings_by_category.fasting),
                post_meal: convert_stats(analysis.readings_by_category.post_meal),
                random: convert_stats(analysis.readings_by_category.random),
            },
            recent_trend: match analysis.recent_trend {
                domain::GlucoseTrend::Improving => "improving",
                domain::GlucoseTrend::Worsening => "worsening",
                domain::GlucoseTrend::Stable => "stable",
            }
            .to_string(),
            recommendations: analysis.recommendations,
        },
        period: report.period,
    }
}
