use crate::entities::glucose::GlucoseTrend;

/// Readings required before a trend is computed at all
pub const TREND_MIN_READINGS: usize = 14;

/// Readings in each comparison window
const TREND_WINDOW: usize = 7;

/// Change in mg/dL between window averages considered meaningful
const TREND_THRESHOLD: f64 = 5.0;

/// Detect a short-term trend from reading values ordered newest first.
///
/// The seven most recent values are averaged and compared against the
/// average of the seven before them. A drop of more than the threshold is
/// improving, a rise of more than the threshold is worsening, anything
/// else, including fewer than fourteen readings, is stable.
pub fn detect_trend(values: &[f64]) -> GlucoseTrend {
    if values.len() < TREND_MIN_READINGS {
        return GlucoseTrend::Stable;
    }

    let recent_avg = average(&values[..TREND_WINDOW]);
    let previous_avg = average(&values[TREND_WINDOW..TREND_WINDOW * 2]);
    let change = recent_avg - previous_avg;

    if change < -TREND_THRESHOLD {
        GlucoseTrend::Improving
    } else if change > TREND_THRESHOLD {
        GlucoseTrend::Worsening
    } else {
        GlucoseTrend::Stable
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_readings_is_stable() {
        assert_eq!(detect_trend(&[]), GlucoseTrend::Stable);

        // 13 readings with a large drop would otherwise read as improving
        let mut values = vec![200.0; 6];
        values.extend(vec![100.0; 7]);
        assert_eq!(values.len(), 13);
        assert_eq!(detect_trend(&values), GlucoseTrend::Stable);
    }

    #[test]
    fn test_improving_when_recent_window_drops() {
        // newest first: recent window averages 100, previous averages 120
        let mut values = vec![100.0; 7];
        values.extend(vec![120.0; 7]);
        assert_eq!(detect_trend(&values), GlucoseTrend::Improving);
    }

    #[test]
    fn test_worsening_when_recent_window_rises() {
        let mut values = vec![140.0; 7];
        values.extend(vec![120.0; 7]);
        assert_eq!(detect_trend(&values), GlucoseTrend::Worsening);
    }

    #[test]
    fn test_change_at_threshold_is_stable() {
        // a change of exactly 5 in either direction is not meaningful
        let mut values = vec![125.0; 7];
        values.extend(vec![120.0; 7]);
        assert_eq!(detect_trend(&values), GlucoseTrend::Stable);

        let mut values = vec![115.0; 7];
        values.extend(vec![120.0; 7]);
        assert_eq!(detect_trend(&values), GlucoseTrend::Stable);
    }

    #[test]
    fn test_only_first_fourteen_values_count() {
        // a huge older tail must not affect the two windows
        let mut values = vec![100.0; 7];
        values.extend(vec![120.0; 7]);
        values.extend(vec![400.0; 20]);
        assert_eq!(detect_trend(&values), GlucoseTrend::Improving);
    }
}
