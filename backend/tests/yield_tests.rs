//! Yield prediction tests
//!
//! Property-based and unit tests for:
//! - Property 1: Predicted yield is never negative
//! - Property 2: Confidence stays within [0.6, 0.95] and grows with completeness
//! - Property 3: Uncertainty bounds bracket the prediction
//! - Property 4: Feature importance is non-negative and bounded for in-range inputs

use proptest::prelude::*;
use shared::inference::yield_prediction::completeness_confidence;
use shared::reference::{FEATURE_SCALERS, YIELD_MODEL};
use shared::{predict_yield, FeatureVector, InferenceError};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Build a feature vector from per-feature z-scores and a presence mask
fn features_from(z_scores: &[f64], present: &[bool]) -> FeatureVector {
    FEATURE_SCALERS
        .iter()
        .zip(z_scores.iter().zip(present))
        .filter(|(_, (_, keep))| **keep)
        .map(|((name, scaler), (z, _))| (name.to_string(), scaler.mean + z * scaler.std))
        .collect()
}

/// Z-scores within three standard deviations of the reference mean
fn z_scores_strategy(bound: f64) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-bound..bound, FEATURE_SCALERS.len())
}

fn mask_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), FEATURE_SCALERS.len())
}

fn crop_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("corn".to_string()),
        Just("soybean".to_string()),
        Just("wheat".to_string()),
        Just("rice".to_string()),
        Just("barley".to_string()),
    ]
}

fn single(name: &str, value: f64) -> FeatureVector {
    FeatureVector::from([(name.to_string(), value)])
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_features_rejected() {
        let err = predict_yield(&FeatureVector::new(), "corn").unwrap_err();
        assert!(matches!(err, InferenceError::InvalidInput(_)));
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_features_at_reference_mean_give_base_yield() {
        let features: FeatureVector = FEATURE_SCALERS
            .iter()
            .map(|(name, scaler)| (name.to_string(), scaler.mean))
            .collect();

        let result = predict_yield(&features, "corn").unwrap();

        assert_eq!(result.predicted_yield, 8.5);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.feature_importance.len(), YIELD_MODEL.feature_count());
        assert!(result.feature_importance.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_unknown_features_are_ignored() {
        let result = predict_yield(&single("drone_altitude", 120.0), "corn").unwrap();

        assert_eq!(result.predicted_yield, 8.5);
        assert_eq!(result.confidence, 0.6);
        assert!(result.feature_importance.is_empty());
    }

    #[test]
    fn test_crop_lookup_ignores_case() {
        let features = single("weather_temp", 28.0);
        let lower = predict_yield(&features, "soybean").unwrap();
        let upper = predict_yield(&features, "SOYBEAN").unwrap();

        assert_eq!(lower.predicted_yield, upper.predicted_yield);
        assert_eq!(upper.model_info.crop_factor, 0.7);
        // Reported crop type is echoed as given
        assert_eq!(upper.model_info.crop_type, "SOYBEAN");
    }

    #[test]
    fn test_unknown_crop_uses_neutral_factor() {
        let result = predict_yield(&single("weather_temp", 28.0), "quinoa").unwrap();
        assert_eq!(result.model_info.crop_factor, 1.0);
        assert_eq!(result.predicted_yield, 8.65);
    }

    #[test]
    fn test_rice_scales_prediction_up() {
        let result = predict_yield(&single("weather_temp", 28.0), "rice").unwrap();
        assert!((result.predicted_yield - 9.515).abs() < 0.01);
    }

    #[test]
    fn test_very_poor_conditions_clamp_to_zero() {
        let result = predict_yield(&single("satellite_ndvi", -100.0), "corn").unwrap();

        assert_eq!(result.predicted_yield, 0.0);
        assert_eq!(result.uncertainty.lower_bound, 0.0);
        assert_eq!(result.uncertainty.upper_bound, 0.0);
    }

    #[test]
    fn test_model_info() {
        let result = predict_yield(&single("soil_ph", 6.8), "wheat").unwrap();
        assert_eq!(result.model_info.model_type, "random_forest_simulation");
        assert_eq!(result.model_info.base_yield, 8.5);
        assert_eq!(result.model_info.crop_factor, 0.9);
    }

    #[test]
    fn test_completeness_confidence_caps() {
        assert_eq!(completeness_confidence(0, 12), 0.6);
        assert_eq!(completeness_confidence(12, 12), 0.95);
        assert_eq!(completeness_confidence(0, 0), 0.6);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 1: Predicted yield is never negative
        #[test]
        fn prop_yield_non_negative(
            z in z_scores_strategy(6.0),
            mask in mask_strategy(),
            crop in crop_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let result = predict_yield(&features, &crop).unwrap();
            prop_assert!(result.predicted_yield >= 0.0);
            prop_assert!(result.uncertainty.std_deviation >= 0.0);
        }

        /// Property 2: Confidence stays within [0.6, 0.95]
        #[test]
        fn prop_confidence_in_range(
            z in z_scores_strategy(3.0),
            mask in mask_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let result = predict_yield(&features, "corn").unwrap();
            prop_assert!(result.confidence >= 0.6);
            prop_assert!(result.confidence <= 0.95);
        }

        /// Property 2 (continued): Adding a model feature never lowers confidence
        #[test]
        fn prop_confidence_monotone_in_completeness(
            z in z_scores_strategy(3.0),
            mask in mask_strategy(),
            extra in 0usize..12
        ) {
            let mut fuller = mask.clone();
            fuller[extra] = true;

            let sparse = features_from(&z, &mask);
            prop_assume!(!sparse.is_empty());
            let dense = features_from(&z, &fuller);

            let before = predict_yield(&sparse, "corn").unwrap().confidence;
            let after = predict_yield(&dense, "corn").unwrap().confidence;
            prop_assert!(after >= before);
        }

        /// Property 3: Uncertainty bounds bracket the prediction
        #[test]
        fn prop_bounds_bracket_prediction(
            z in z_scores_strategy(3.0),
            mask in mask_strategy(),
            crop in crop_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let result = predict_yield(&features, &crop).unwrap();
            prop_assert!(result.uncertainty.lower_bound <= result.predicted_yield);
            prop_assert!(result.predicted_yield <= result.uncertainty.upper_bound);
        }

        /// Property 4: Importance is non-negative and only covers model features
        #[test]
        fn prop_importance_non_negative(
            z in z_scores_strategy(6.0),
            mask in mask_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let result = predict_yield(&features, "corn").unwrap();
            prop_assert_eq!(result.feature_importance.len(), features.len());
            for value in result.feature_importance.values() {
                prop_assert!(*value >= 0.0);
            }
        }

        /// Property 4 (continued): Importance sums to at most 1 within one standard deviation
        #[test]
        fn prop_importance_bounded_for_in_range_inputs(
            z in z_scores_strategy(1.0),
            mask in mask_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let result = predict_yield(&features, "corn").unwrap();
            let total: f64 = result.feature_importance.values().sum();
            prop_assert!(total <= 1.0 + 1e-9);
        }

        /// Property: Prediction is a pure function of its inputs
        #[test]
        fn prop_prediction_idempotent(
            z in z_scores_strategy(3.0),
            mask in mask_strategy(),
            crop in crop_strategy()
        ) {
            let features = features_from(&z, &mask);
            prop_assume!(!features.is_empty());

            let first = predict_yield(&features, &crop).unwrap();
            let second = predict_yield(&features, &crop).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
