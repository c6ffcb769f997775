#[cfg(test)]
mod glucose_handler_tests {
    use std::sync::Arc;

    use axum::extract::{Json, Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use gluco_track_data::models::glucose as data_models;
    use gluco_track_domain::testing::{sample_reading, MockBackend};

    use crate::api::handlers::glucose::{
        get_glucose_analysis, get_glucose_targets, update_glucose_targets,
        update_reminder_settings, AnalysisQueryParams, GlucoseServices,
    };
    use crate::entities::glucose::{UpdateGlucoseTargetsRequest, UpdateReminderSettingsRequest};

    fn services(backend: &MockBackend) -> GlucoseServices {
        GlucoseServices {
            targets: Arc::new(backend.target_service()),
            analysis: Arc::new(backend.analysis_service()),
        }
    }

    #[tokio::test]
    async fn test_get_targets_returns_defaults() {
        let backend = MockBackend::new();

        let response = get_glucose_targets(
            State(services(&backend)),
            Path("patient-1".to_string()),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_targets_rejects_out_of_range_payload() {
        let backend = MockBackend::new();

        let request = UpdateGlucoseTargetsRequest {
            fasting_min: Some(5.0),
            ..Default::default()
        };

        let result = update_glucose_targets(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Json(request),
        )
        .await;

        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_targets_rejects_inverted_range() {
        let backend = MockBackend::new();

        // within payload bounds but inverts the fasting range
        let request = UpdateGlucoseTargetsRequest {
            fasting_min: Some(120.0),
            ..Default::default()
        };

        let result = update_glucose_targets(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Json(request),
        )
        .await;

        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_targets_accepts_valid_payload() {
        let backend = MockBackend::new();

        let request = UpdateGlucoseTargetsRequest {
            fasting_max: Some(110.0),
            ..Default::default()
        };

        let response = update_glucose_targets(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Json(request),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_reminders_without_config_is_not_found() {
        let backend = MockBackend::new();

        let request = UpdateReminderSettingsRequest {
            reminder_enabled: false,
            reminder_times: None,
            reminder_days: None,
        };

        let result = update_reminder_settings(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Json(request),
        )
        .await;

        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analysis_without_config_is_not_found() {
        let backend = MockBackend::new();

        let result = get_glucose_analysis(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Query(AnalysisQueryParams { days: None }),
        )
        .await;

        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analysis_with_config_and_readings() {
        let backend = MockBackend::with_targets(data_models::GlucoseTargets::with_defaults(
            "patient-1",
        ))
        .with_readings(vec![
            sample_reading("patient-1", 95.0, "fasting", 1),
            sample_reading("patient-1", 160.0, "post_meal", 2),
        ]);

        let response = get_glucose_analysis(
            State(services(&backend)),
            Path("patient-1".to_string()),
            Query(AnalysisQueryParams { days: Some(7) }),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
