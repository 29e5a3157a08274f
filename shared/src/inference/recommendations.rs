//! Advisory rules for stress analysis results

use crate::models::{StressLevel, TrendDirection};

const SEVERE_STRESS: &[&str] = &[
    "Immediate irrigation required to prevent crop damage",
    "Consider emergency nutrient application",
    "Investigate potential pest or disease issues",
];

const HIGH_STRESS: &[&str] = &[
    "Increase irrigation frequency",
    "Monitor for pest and disease pressure",
    "Consider stress-reducing treatments",
];

const MODERATE_STRESS: &[&str] = &[
    "Optimize irrigation timing",
    "Monitor crop development closely",
];

const DECLINING_TREND: &[&str] = &[
    "Investigate causes of declining vegetation health",
    "Consider soil testing for nutrient deficiencies",
];

const IMPROVING_TREND: &[&str] = &["Continue current management practices"];

const HIGH_VARIABILITY: &[&str] = &[
    "High variability detected - investigate field uniformity",
    "Consider precision management approaches",
];

/// More anomalies than this trigger the variability advice
const ANOMALY_ALERT_COUNT: usize = 2;

/// Build recommendations: stress level group, then trend, then anomalies
pub fn stress_recommendations(
    stress_level: StressLevel,
    trend: TrendDirection,
    anomaly_count: usize,
) -> Vec<String> {
    let stress_group: &[&str] = match stress_level {
        StressLevel::Severe => SEVERE_STRESS,
        StressLevel::High => HIGH_STRESS,
        StressLevel::Moderate => MODERATE_STRESS,
        StressLevel::Low => &[],
    };

    let trend_group: &[&str] = match trend {
        TrendDirection::Declining => DECLINING_TREND,
        TrendDirection::Improving => IMPROVING_TREND,
        TrendDirection::Stable => &[],
    };

    let anomaly_group: &[&str] = if anomaly_count > ANOMALY_ALERT_COUNT {
        HIGH_VARIABILITY
    } else {
        &[]
    };

    stress_group
        .iter()
        .chain(trend_group)
        .chain(anomaly_group)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stable_has_no_advice() {
        assert!(stress_recommendations(StressLevel::Low, TrendDirection::Stable, 0).is_empty());
        assert!(stress_recommendations(StressLevel::Low, TrendDirection::Stable, 2).is_empty());
    }

    #[test]
    fn test_groups_in_order() {
        let recs = stress_recommendations(StressLevel::Severe, TrendDirection::Declining, 3);
        assert_eq!(recs.len(), 7);
        assert_eq!(recs[0], "Immediate irrigation required to prevent crop damage");
        assert_eq!(recs[3], "Investigate causes of declining vegetation health");
        assert_eq!(recs[5], "High variability detected - investigate field uniformity");
        assert_eq!(recs[6], "Consider precision management approaches");
    }

    #[test]
    fn test_moderate_improving() {
        let recs = stress_recommendations(StressLevel::Moderate, TrendDirection::Improving, 1);
        assert_eq!(
            recs,
            vec![
                "Optimize irrigation timing",
                "Monitor crop development closely",
                "Continue current management practices",
            ]
        );
    }

    #[test]
    fn test_high_stress_group() {
        let recs = stress_recommendations(StressLevel::High, TrendDirection::Stable, 0);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "Increase irrigation frequency");
    }
}
