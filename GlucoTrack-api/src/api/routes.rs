use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use crate::api::handlers::{glucose, health};
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub async fn create_app() -> Router {
    debug!("Creating application router");

    // Create the glucose services using the factory function
    let glucose_services = glucose::create_services();

    // Patient-scoped glucose routes
    let api_routes = Router::new()
        .route(
            "/patients/:patient_id/glucose/targets",
            get(glucose::get_glucose_targets).put(glucose::update_glucose_targets),
        )
        .route(
            "/patients/:patient_id/glucose/targets/reminders",
            put(glucose::update_reminder_settings),
        )
        .route(
            "/patients/:patient_id/glucose/analysis",
            get(glucose::get_glucose_analysis),
        );

    debug!("API routes configured");

    // Public routes
    let public_routes = Router::new().route("/health", get(health::health_check));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(glucose_services);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Initialize health check service startup time
    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = configure_swagger_routes();

    app.merge(swagger)
}
