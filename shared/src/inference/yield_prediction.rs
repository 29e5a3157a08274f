//! Yield prediction over the weighted-sum model

use std::collections::BTreeMap;

use crate::error::{InferenceError, InferenceResult};
use crate::inference::rounding::round_dp;
use crate::models::{FeatureVector, ModelInfo, PredictionResult, UncertaintyBounds};
use crate::reference::{scaler_for, YIELD_MODEL};
use crate::validation::ensure_finite;

const OPERATION: &str = "Yield prediction";

const MIN_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;
/// Confidence gained when every model feature is present
const COMPLETENESS_WEIGHT: f64 = 0.35;
/// Width of the uncertainty band relative to the uncertainty factor
const BOUND_SPREAD: f64 = 0.2;
const STD_SPREAD: f64 = 0.1;

/// Z-score normalize features that have reference statistics
///
/// Features without a scaler pass through unchanged.
pub fn normalize_features(features: &FeatureVector) -> BTreeMap<&str, f64> {
    features
        .iter()
        .map(|(name, value)| {
            let normalized = match scaler_for(name) {
                Some(scaler) => scaler.normalize(*value),
                None => *value,
            };
            (name.as_str(), normalized)
        })
        .collect()
}

/// Confidence from the fraction of model features present
pub fn completeness_confidence(present: usize, total: usize) -> f64 {
    let completeness = if total == 0 {
        0.0
    } else {
        present as f64 / total as f64
    };
    MAX_CONFIDENCE.min(MIN_CONFIDENCE + completeness * COMPLETENESS_WEIGHT)
}

/// Predict crop yield for a feature vector and crop type
pub fn predict_yield(features: &FeatureVector, crop_type: &str) -> InferenceResult<PredictionResult> {
    if features.is_empty() {
        return Err(InferenceError::invalid_input(
            "Features are required for yield prediction",
        ));
    }

    let model = &YIELD_MODEL;
    let normalized = normalize_features(features);

    let mut prediction = model.base_yield;
    let mut total_weight = 0.0;
    let mut contributions: Vec<(&str, f64)> = Vec::new();

    for &(feature, weight) in model.feature_weights {
        if let Some(z) = normalized.get(feature) {
            let contribution = z * weight;
            prediction += contribution;
            total_weight += weight.abs();
            contributions.push((feature, contribution.abs()));
        }
    }

    let crop_factor = model.crop_factor(crop_type);
    let prediction = ensure_finite(OPERATION, "predicted yield", prediction * crop_factor)?.max(0.0);

    let present = model
        .feature_weights
        .iter()
        .filter(|(feature, _)| features.contains_key(*feature))
        .count();
    let confidence = completeness_confidence(present, model.feature_count());

    let uncertainty_factor = 1.0 - confidence;
    let lower_bound = prediction * (1.0 - uncertainty_factor * BOUND_SPREAD);
    let upper_bound = prediction * (1.0 + uncertainty_factor * BOUND_SPREAD);
    let std_deviation = prediction * uncertainty_factor * STD_SPREAD;

    let mut feature_importance = BTreeMap::new();
    for (feature, magnitude) in contributions {
        let importance = if total_weight > 0.0 {
            magnitude / total_weight
        } else {
            0.0
        };
        feature_importance.insert(
            feature.to_string(),
            ensure_finite(OPERATION, "feature importance", importance)?,
        );
    }

    Ok(PredictionResult {
        predicted_yield: round_dp(prediction, 2),
        confidence: round_dp(confidence, 3),
        uncertainty: UncertaintyBounds {
            lower_bound: round_dp(lower_bound, 2),
            upper_bound: round_dp(upper_bound, 2),
            std_deviation: round_dp(std_deviation, 2),
        },
        feature_importance,
        model_info: ModelInfo {
            model_type: model.model_type.to_string(),
            crop_type: crop_type.to_string(),
            base_yield: model.base_yield,
            crop_factor,
        },
    })
}
