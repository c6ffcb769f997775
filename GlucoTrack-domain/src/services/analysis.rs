use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::debug;

use crate::entities::conversions;
use crate::entities::glucose::{
    AnalysisReport, CategoryBreakdown, GlucoseAnalysis, GlucoseReading, GlucoseTargets,
    GlucoseTrend, ReadingCategory, ReadingStatus,
};
use crate::services::classification::{classify, is_within_target};
use crate::services::recommendations::{generate_recommendations, AnalysisStats};
use crate::services::targets::GlucoseServiceError;
use crate::services::trend::detect_trend;
use gluco_track_data::repository::{GlucoseTargetRepositoryTrait, HealthDataRepositoryTrait};

fn rounded_average(values: &[f64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    (values.iter().sum::<f64>() / values.len() as f64).round() as i64
}

/// Analyze a window of readings against a target configuration.
///
/// Readings are expected newest first; the trend windows depend on that
/// order. An empty window produces an all-zero analysis with a stable
/// trend and no recommendations.
pub fn analyze(targets: &GlucoseTargets, readings: &[GlucoseReading]) -> GlucoseAnalysis {
    let mut within_target = 0;
    let mut above_target = 0;
    let mut below_target = 0;
    let mut by_category = CategoryBreakdown::default();

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();

    for reading in readings {
        match classify(targets, reading.value, reading.category) {
            ReadingStatus::Within => within_target += 1,
            ReadingStatus::Above => above_target += 1,
            ReadingStatus::Below => below_target += 1,
        }
    }

    for category in ReadingCategory::ALL {
        let group: Vec<f64> = readings
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.value)
            .collect();

        let stats = by_category.get_mut(category);
        stats.total = group.len();
        stats.within_target = group
            .iter()
            .filter(|&&value| is_within_target(targets, value, category))
            .count();
        stats.average = rounded_average(&group);
    }

    let recent_trend = if readings.is_empty() {
        GlucoseTrend::Stable
    } else {
        detect_trend(&values)
    };

    let recommendations = generate_recommendations(&AnalysisStats {
        total_readings: readings.len(),
        within_target,
        above_target,
        recent_trend,
        fasting: by_category.fasting,
    });

    GlucoseAnalysis {
        total_readings: readings.len(),
        within_target,
        above_target,
        below_target,
        average_glucose: rounded_average(&values),
        readings_by_category: by_category,
        recent_trend,
        recommendations,
    }
}

/// Trait for glucose analysis operations
#[async_trait]
pub trait GlucoseAnalysisServiceTrait {
    /// Build the analysis report for a patient over a trailing window of
    /// days. Fails with NotFound when the patient has no target
    /// configuration; analysis never creates one.
    async fn build_report(
        &self,
        patient_id: &str,
        days: u32,
    ) -> Result<AnalysisReport, GlucoseServiceError>;
}

/// Glucose analysis service joining the target configuration with the
/// patient's readings
pub struct GlucoseAnalysisService<T, H>
where
    T: GlucoseTargetRepositoryTrait,
    H: HealthDataRepositoryTrait,
{
    targets: T,
    health_data: H,
}

impl<T, H> GlucoseAnalysisService<T, H>
where
    T: GlucoseTargetRepositoryTrait,
    H: HealthDataRepositoryTrait,
{
    /// Create a new analysis service
    pub fn new(targets: T, health_data: H) -> Self {
        Self {
            targets,
            health_data,
        }
    }
}

#[async_trait]
impl<T, H> GlucoseAnalysisServiceTrait for GlucoseAnalysisService<T, H>
where
    T: GlucoseTargetRepositoryTrait + Send + Sync,
    H: HealthDataRepositoryTrait + Send + Sync,
{
    async fn build_report(
        &self,
        patient_id: &str,
        days: u32,
    ) -> Result<AnalysisReport, GlucoseServiceError> {
        let data_targets = self
            .targets
            .find_by_patient(patient_id)
            .await
            .map_err(|e| GlucoseServiceError::RepositoryError(e.to_string()))?
            .ok_or_else(|| {
                GlucoseServiceError::NotFound(format!(
                    "No glucose targets found for patient {}",
                    patient_id
                ))
            })?;

        let since = (Utc::now() - Duration::days(days as i64)).to_rfc3339();
        let data_readings = self
            .health_data
            .list_glucose_readings(patient_id, Some(since))
            .await
            .map_err(|e| GlucoseServiceError::RepositoryError(e.to_string()))?;

        debug!(
            "Analyzing {} glucose readings for patient {} over {} days",
            data_readings.len(),
            patient_id,
            days
        );

        let targets = conversions::convert_to_domain_targets(data_targets);
        let readings: Vec<GlucoseReading> = data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect();

        let analysis = analyze(&targets, &readings);

        Ok(AnalysisReport {
            targets,
            analysis,
            period: format!("{} days", days),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gluco_track_data::models::glucose as data_models;
    use gluco_track_data::repository::reading_mocks::MockHealthDataRepository;
    use gluco_track_data::repository::target_mocks::MockGlucoseTargetRepository;

    fn domain_targets() -> GlucoseTargets {
        conversions::convert_to_domain_targets(data_models::GlucoseTargets::with_defaults(
            "patient-1",
        ))
    }

    fn reading(value: f64, category: ReadingCategory, timestamp: &str) -> GlucoseReading {
        GlucoseReading {
            id: uuid::Uuid::new_v4().to_string(),
            value,
            category,
            timestamp: timestamp.to_string(),
        }
    }

    fn data_reading(value: f64, category: &str, timestamp: &str) -> data_models::GlucoseReading {
        data_models::GlucoseReading {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: "patient-1".to_string(),
            value,
            category: Some(category.to_string()),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_analyze_empty_window() {
        let analysis = analyze(&domain_targets(), &[]);

        assert_eq!(analysis.total_readings, 0);
        assert_eq!(analysis.within_target, 0);
        assert_eq!(analysis.average_glucose, 0);
        assert_eq!(analysis.readings_by_category.fasting.average, 0);
        assert_eq!(analysis.recent_trend, GlucoseTrend::Stable);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_analyze_counts_and_averages() {
        let readings = vec![
            reading(90.0, ReadingCategory::Fasting, "2026-08-03T08:00:00+00:00"),
            reading(150.0, ReadingCategory::PostMeal, "2026-08-02T14:00:00+00:00"),
            reading(60.0, ReadingCategory::Random, "2026-08-01T20:00:00+00:00"),
        ];
        let analysis = analyze(&domain_targets(), &readings);

        assert_eq!(analysis.total_readings, 3);
        assert_eq!(analysis.within_target, 1);
        assert_eq!(analysis.above_target, 1);
        assert_eq!(analysis.below_target, 1);
        // (90 + 150 + 60) / 3 = 100
        assert_eq!(analysis.average_glucose, 100);

        assert_eq!(analysis.readings_by_category.fasting.total, 1);
        assert_eq!(analysis.readings_by_category.fasting.within_target, 1);
        assert_eq!(analysis.readings_by_category.fasting.average, 90);
        assert_eq!(analysis.readings_by_category.post_meal.within_target, 0);
    }

    #[test]
    fn test_analyze_average_is_rounded() {
        let readings = vec![
            reading(100.0, ReadingCategory::Random, "2026-08-02T08:00:00+00:00"),
            reading(101.0, ReadingCategory::Random, "2026-08-01T08:00:00+00:00"),
        ];
        let analysis = analyze(&domain_targets(), &readings);

        // 100.5 rounds away from zero
        assert_eq!(analysis.average_glucose, 101);
    }

    #[test]
    fn test_analyze_picks_up_worsening_trend() {
        // newest first: recent week at 150, previous week at 120
        let mut readings = Vec::new();
        for day in 0..7 {
            readings.push(reading(
                150.0,
                ReadingCategory::Random,
                &format!("2026-08-{:02}T08:00:00+00:00", 14 - day),
            ));
        }
        for day in 7..14 {
            readings.push(reading(
                120.0,
                ReadingCategory::Random,
                &format!("2026-08-{:02}T08:00:00+00:00", 14 - day),
            ));
        }

        let analysis = analyze(&domain_targets(), &readings);
        assert_eq!(analysis.recent_trend, GlucoseTrend::Worsening);
        assert!(analysis
            .recommendations
            .iter()
            .any(|m| m.contains("increasing levels")));
    }

    #[tokio::test]
    async fn test_build_report_requires_targets() {
        let service = GlucoseAnalysisService::new(
            MockGlucoseTargetRepository::new(),
            MockHealthDataRepository::new(),
        );

        let err = service.build_report("patient-1", 30).await.unwrap_err();
        assert!(matches!(err, GlucoseServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_build_report_with_existing_targets() {
        let targets_repo = MockGlucoseTargetRepository::with_targets(
            data_models::GlucoseTargets::with_defaults("patient-1"),
        );
        let now = Utc::now().to_rfc3339();
        let readings_repo = MockHealthDataRepository::with_readings(vec![
            data_reading(95.0, "fasting", &now),
            data_reading(130.0, "post_meal", &now),
        ]);

        let service = GlucoseAnalysisService::new(targets_repo, readings_repo);
        let report = service.build_report("patient-1", 30).await.unwrap();

        assert_eq!(report.period, "30 days");
        assert_eq!(report.analysis.total_readings, 2);
        assert_eq!(report.analysis.within_target, 2);
        assert_eq!(report.targets.patient_id, "patient-1");
    }

    #[tokio::test]
    async fn test_build_report_excludes_old_readings() {
        let targets_repo = MockGlucoseTargetRepository::with_targets(
            data_models::GlucoseTargets::with_defaults("patient-1"),
        );
        let old = (Utc::now() - Duration::days(90)).to_rfc3339();
        let recent = Utc::now().to_rfc3339();
        let readings_repo = MockHealthDataRepository::with_readings(vec![
            data_reading(95.0, "fasting", &recent),
            data_reading(250.0, "random", &old),
        ]);

        let service = GlucoseAnalysisService::new(targets_repo, readings_repo);
        let report = service.build_report("patient-1", 30).await.unwrap();

        assert_eq!(report.analysis.total_readings, 1);
        assert_eq!(report.analysis.above_target, 0);
    }
}
