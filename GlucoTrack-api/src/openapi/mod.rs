use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Glucose endpoints
        crate::api::handlers::glucose::get_glucose_targets,
        crate::api::handlers::glucose::update_glucose_targets,
        crate::api::handlers::glucose::update_reminder_settings,
        crate::api::handlers::glucose::get_glucose_analysis,
    ),
    components(
        schemas(
            // Entities
            crate::entities::glucose::GlucoseTargets,
            crate::entities::glucose::TargetRange,
            crate::entities::glucose::ReminderTime,
            crate::entities::glucose::UpdateGlucoseTargetsRequest,
            crate::entities::glucose::UpdateReminderSettingsRequest,
            crate::entities::glucose::TargetsUpdatedResponse,
            crate::entities::glucose::AnalysisResponse,
            crate::entities::glucose::GlucoseAnalysis,
            crate::entities::glucose::CategoryBreakdown,
            crate::entities::glucose::CategoryStats,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Glucose handlers
            crate::api::handlers::glucose::ErrorResponse,
            crate::api::handlers::glucose::AnalysisQueryParams,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "glucose", description = "Glucose target and analysis endpoints")
    ),
    info(
        title = "GlucoTrack API",
        version = "0.1.0",
        description = "API for managing glucose targets and analyzing readings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "GlucoTrack API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(tags.iter().any(|tag| tag.name == "glucose"));

        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/patients/{patient_id}/glucose/targets"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/patients/{patient_id}/glucose/targets/reminders"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/patients/{patient_id}/glucose/analysis"));
    }
}
