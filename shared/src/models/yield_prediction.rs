//! Yield prediction models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named agronomic features (e.g. `weather_temp`, `soil_ph`) and their values
pub type FeatureVector = BTreeMap<String, f64>;

/// Yield prediction with confidence and explanation metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Predicted yield, never negative
    pub predicted_yield: f64,
    /// Heuristic confidence in [0.6, 0.95]
    pub confidence: f64,
    pub uncertainty: UncertaintyBounds,
    /// Share of the total weight each used feature contributed
    pub feature_importance: BTreeMap<String, f64>,
    pub model_info: ModelInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UncertaintyBounds {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub std_deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub model_type: String,
    /// Crop type exactly as requested
    pub crop_type: String,
    pub base_yield: f64,
    pub crop_factor: f64,
}
