use crate::entities::glucose::{CategoryStats, GlucoseTrend};

/// Snapshot of the aggregate figures the advisory rules look at
#[derive(Debug, Clone, Copy)]
pub struct AnalysisStats {
    /// Number of readings in the analysis window
    pub total_readings: usize,

    /// Readings inside their category's target range
    pub within_target: usize,

    /// Readings above their category's maximum
    pub above_target: usize,

    /// Detected short-term trend
    pub recent_trend: GlucoseTrend,

    /// Aggregates for fasting readings only
    pub fasting: CategoryStats,
}

struct Rule {
    applies: fn(&AnalysisStats) -> bool,
    message: &'static str,
}

/// Advisory rules, evaluated in order. Each contributes its message at
/// most once per analysis.
const RULES: [Rule; 4] = [
    Rule {
        applies: |stats| {
            let percentage = stats.within_target as f64 / stats.total_readings as f64 * 100.0;
            percentage < 70.0
        },
        message:
            "Consider consulting with your healthcare provider about your glucose management plan",
    },
    Rule {
        applies: |stats| stats.above_target > stats.within_target,
        message:
            "Focus on dietary modifications and regular exercise to help lower glucose levels",
    },
    Rule {
        applies: |stats| stats.recent_trend == GlucoseTrend::Worsening,
        message:
            "Your recent glucose trend shows increasing levels - consider reviewing your recent lifestyle changes",
    },
    Rule {
        applies: |stats| {
            stats.fasting.total > 0
                && (stats.fasting.within_target as f64 / stats.fasting.total as f64) < 0.7
        },
        message:
            "Your fasting glucose levels need attention - consider discussing medication timing with your doctor",
    },
];

/// Advisory messages for an analysis, in rule order.
/// An empty window produces no recommendations at all.
pub fn generate_recommendations(stats: &AnalysisStats) -> Vec<String> {
    if stats.total_readings == 0 {
        return Vec::new();
    }

    RULES
        .iter()
        .filter(|rule| (rule.applies)(stats))
        .map(|rule| rule.message.to_string())
        .collect()
}
