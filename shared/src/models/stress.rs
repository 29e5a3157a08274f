//! Vegetation stress analysis models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single satellite observation
///
/// Both fields are optional on the wire; observations missing either one are
/// skipped by the analyzer. Any additional fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SatelliteObservation {
    /// Date label; numeric or boolean dates are kept as their JSON text
    #[serde(default, deserialize_with = "date_label")]
    pub date: Option<String>,
    #[serde(default)]
    pub ndvi: Option<f64>,
}

fn date_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(date)) => Some(date),
        Some(other) => Some(other.to_string()),
    })
}

impl SatelliteObservation {
    pub fn new(date: impl Into<String>, ndvi: f64) -> Self {
        Self {
            date: Some(date.into()),
            ndvi: Some(ndvi),
        }
    }
}

/// Stress level classified from mean NDVI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl StressLevel {
    /// >0.7 low, >0.5 moderate, >0.3 high, otherwise severe
    pub fn from_mean_ndvi(mean_ndvi: f64) -> Self {
        if mean_ndvi > 0.7 {
            StressLevel::Low
        } else if mean_ndvi > 0.5 {
            StressLevel::Moderate
        } else if mean_ndvi > 0.3 {
            StressLevel::High
        } else {
            StressLevel::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Moderate => "moderate",
            StressLevel::High => "high",
            StressLevel::Severe => "severe",
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the NDVI trend line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.01 {
            TrendDirection::Improving
        } else if slope < -0.01 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignificance {
    High,
    Moderate,
    Low,
}

impl TrendSignificance {
    pub fn from_slope(slope: f64) -> Self {
        let magnitude = slope.abs();
        if magnitude > 0.02 {
            TrendSignificance::High
        } else if magnitude > 0.005 {
            TrendSignificance::Moderate
        } else {
            TrendSignificance::Low
        }
    }
}

/// Whether an anomaly sits below or above the mean
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyType {
    Low,
    High,
}

/// Observation deviating more than two standard deviations from the mean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdviAnomaly {
    pub date: String,
    pub ndvi: f64,
    pub deviation: f64,
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdviStatistics {
    pub mean_ndvi: f64,
    pub std_ndvi: f64,
    pub min_ndvi: f64,
    pub max_ndvi: f64,
    pub coefficient_of_variation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    pub slope: f64,
    pub significance: TrendSignificance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressAnalysisInfo {
    /// Number of usable observations
    pub observations: usize,
    /// "<first date> to <last date>" in input order
    pub date_range: String,
    pub method: String,
}

/// Stress classification, trend and anomalies for an NDVI time series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressResult {
    pub stress_level: StressLevel,
    pub confidence: f64,
    pub statistics: NdviStatistics,
    pub trend: TrendSummary,
    pub anomalies: Vec<NdviAnomaly>,
    pub recommendations: Vec<String>,
    pub analysis_info: StressAnalysisInfo,
}
