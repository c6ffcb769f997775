use crate::entities::glucose::{GlucoseTargets, ReadingCategory, ReadingStatus};

/// Whether a value is within the target range for its category, boundaries included
pub fn is_within_target(targets: &GlucoseTargets, value: f64, category: ReadingCategory) -> bool {
    targets.range_for(category).contains(value)
}

/// Classify a reading against the configured range for its category
pub fn classify(targets: &GlucoseTargets, value: f64, category: ReadingCategory) -> ReadingStatus {
    let range = targets.range_for(category);
    if range.contains(value) {
        ReadingStatus::Within
    } else if value > range.max {
        ReadingStatus::Above
    } else {
        ReadingStatus::Below
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::conversions::convert_to_domain_targets;

    fn default_targets() -> GlucoseTargets {
        convert_to_domain_targets(
            gluco_track_data::models::glucose::GlucoseTargets::with_defaults("patient-1"),
        )
    }

    #[test]
    fn test_classify_boundaries_are_within() {
        let targets = default_targets();

        // Fasting range is 70-100; both boundaries count as within
        assert_eq!(
            classify(&targets, 70.0, ReadingCategory::Fasting),
            ReadingStatus::Within
        );
        assert_eq!(
            classify(&targets, 100.0, ReadingCategory::Fasting),
            ReadingStatus::Within
        );
    }

    #[test]
    fn test_classify_above_and_below() {
        let targets = default_targets();

        assert_eq!(
            classify(&targets, 101.0, ReadingCategory::Fasting),
            ReadingStatus::Above
        );
        assert_eq!(
            classify(&targets, 69.0, ReadingCategory::Fasting),
            ReadingStatus::Below
        );
    }

    #[test]
    fn test_unknown_category_uses_random_range() {
        let targets = default_targets();
        let category = ReadingCategory::parse(Some("bedtime"));

        // Random range is 70-125, so 130 is above; the fasting range
        // would also say above but the post-meal one would not
        assert_eq!(category, ReadingCategory::Random);
        assert_eq!(classify(&targets, 130.0, category), ReadingStatus::Above);
        assert_eq!(classify(&targets, 120.0, category), ReadingStatus::Within);
    }

    #[test]
    fn test_is_within_target_per_category() {
        let targets = default_targets();

        // 130 is inside the post-meal range but outside the other two
        assert!(is_within_target(&targets, 130.0, ReadingCategory::PostMeal));
        assert!(!is_within_target(&targets, 130.0, ReadingCategory::Fasting));
        assert!(!is_within_target(&targets, 130.0, ReadingCategory::Random));
    }

}
