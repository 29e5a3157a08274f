//! Reference tables for the inference engines
//!
//! Heuristic, domain-tuned constants. They are compiled into the binary and
//! shared read-only by every request.

/// Reference statistics for z-score normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScaler {
    pub mean: f64,
    pub std: f64,
}

impl FeatureScaler {
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// (value - mean) / std
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }
}

pub static FEATURE_SCALERS: &[(&str, FeatureScaler)] = &[
    ("weather_temp", FeatureScaler::new(20.0, 8.0)),
    ("weather_rainfall", FeatureScaler::new(500.0, 200.0)),
    ("weather_humidity", FeatureScaler::new(65.0, 15.0)),
    ("weather_gdd", FeatureScaler::new(1500.0, 400.0)),
    ("soil_ph", FeatureScaler::new(6.8, 0.8)),
    ("soil_om", FeatureScaler::new(3.0, 1.5)),
    ("soil_n", FeatureScaler::new(30.0, 15.0)),
    ("soil_p", FeatureScaler::new(25.0, 10.0)),
    ("satellite_ndvi", FeatureScaler::new(0.7, 0.2)),
    ("satellite_evi", FeatureScaler::new(0.5, 0.15)),
    ("field_area", FeatureScaler::new(100.0, 50.0)),
    ("planting_doy", FeatureScaler::new(120.0, 30.0)),
];

/// Look up the scaler for a feature
pub fn scaler_for(feature: &str) -> Option<&'static FeatureScaler> {
    FEATURE_SCALERS
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, scaler)| scaler)
}

/// Weighted-sum yield model (simulates a random forest ensemble)
#[derive(Debug)]
pub struct YieldModel {
    pub model_type: &'static str,
    /// Baseline yield before feature contributions
    pub base_yield: f64,
    /// Feature weights in evaluation order
    pub feature_weights: &'static [(&'static str, f64)],
    pub crop_factors: &'static [(&'static str, f64)],
}

/// Crop factor applied when the crop type is not in the table
pub const DEFAULT_CROP_FACTOR: f64 = 1.0;

impl YieldModel {
    pub fn feature_count(&self) -> usize {
        self.feature_weights.len()
    }

    /// Multiplicative factor for a crop type (case-insensitive)
    pub fn crop_factor(&self, crop_type: &str) -> f64 {
        let crop = crop_type.to_lowercase();
        self.crop_factors
            .iter()
            .find(|(name, _)| *name == crop)
            .map(|(_, factor)| *factor)
            .unwrap_or(DEFAULT_CROP_FACTOR)
    }
}

pub static YIELD_MODEL: YieldModel = YieldModel {
    model_type: "random_forest_simulation",
    base_yield: 8.5,
    feature_weights: &[
        ("weather_temp", 0.15),
        ("weather_rainfall", 0.25),
        ("weather_humidity", 0.08),
        ("weather_gdd", 0.20),
        ("soil_ph", 0.10),
        ("soil_om", 0.12),
        ("soil_n", 0.18),
        ("soil_p", 0.08),
        ("satellite_ndvi", 0.30),
        ("satellite_evi", 0.15),
        ("field_area", 0.05),
        ("planting_doy", 0.08),
    ],
    crop_factors: &[
        ("corn", 1.0),
        ("soybean", 0.7),
        ("wheat", 0.9),
        ("rice", 1.1),
    ],
};

/// Daily water requirement by crop growth stage
pub static STAGE_WATER_REQUIREMENTS: &[(&str, f64)] = &[
    ("germination", 0.3),
    ("emergence", 0.4),
    ("vegetative", 0.6),
    ("flowering", 0.8),
    ("fruiting", 0.7),
    ("maturity", 0.4),
];

/// Requirement used for unrecognized growth stages
pub const DEFAULT_STAGE_REQUIREMENT: f64 = 0.6;

/// Base water requirement for a growth stage (exact, case-sensitive match)
pub fn stage_water_requirement(stage: &str) -> f64 {
    STAGE_WATER_REQUIREMENTS
        .iter()
        .find(|(name, _)| *name == stage)
        .map(|(_, requirement)| *requirement)
        .unwrap_or(DEFAULT_STAGE_REQUIREMENT)
}
