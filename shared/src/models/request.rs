//! Request models for the inference boundary

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::InferenceError;
use crate::models::{FeatureVector, SatelliteObservation};

/// Crop type assumed when a yield request does not name one
pub const DEFAULT_CROP_TYPE: &str = "corn";

/// Inference action selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PredictYield,
    AnalyzeStress,
    OptimizeIrrigation,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::PredictYield => "predict_yield",
            Action::AnalyzeStress => "analyze_stress",
            Action::OptimizeIrrigation => "optimize_irrigation",
        }
    }
}

impl FromStr for Action {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "predict_yield" => Ok(Action::PredictYield),
            "analyze_stress" => Ok(Action::AnalyzeStress),
            "optimize_irrigation" => Ok(Action::OptimizeIrrigation),
            other => Err(InferenceError::UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body accepted by the inference endpoint
///
/// Payloads stay raw JSON until the action is resolved; only the payload
/// matching `action` is lifted into a typed input, the others are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default, deserialize_with = "action_name")]
    pub action: String,
    #[serde(default)]
    pub features: Option<Value>,
    #[serde(default)]
    pub crop_type: Option<Value>,
    #[serde(default)]
    pub satellite_data: Option<Value>,
    #[serde(default)]
    pub field_data: Option<Value>,
}

/// Non-string actions are kept as their JSON text so they fail as unknown
fn action_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(action)) => action,
        Some(other) => other.to_string(),
    })
}

impl InferenceRequest {
    pub fn predict_yield(features: FeatureVector, crop_type: impl Into<String>) -> Self {
        let features = features
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        Self {
            action: Action::PredictYield.as_str().to_string(),
            features: Some(Value::Object(features)),
            crop_type: Some(Value::String(crop_type.into())),
            ..Default::default()
        }
    }

    pub fn analyze_stress(satellite_data: Vec<SatelliteObservation>) -> Self {
        let observations = satellite_data
            .into_iter()
            .map(|obs| {
                let mut entry = Map::new();
                entry.insert("date".to_string(), obs.date.map_or(Value::Null, Value::String));
                entry.insert("ndvi".to_string(), obs.ndvi.map_or(Value::Null, Value::from));
                Value::Object(entry)
            })
            .collect();
        Self {
            action: Action::AnalyzeStress.as_str().to_string(),
            satellite_data: Some(Value::Array(observations)),
            ..Default::default()
        }
    }

    pub fn optimize_irrigation(field_data: BTreeMap<String, Value>) -> Self {
        Self {
            action: Action::OptimizeIrrigation.as_str().to_string(),
            field_data: Some(Value::Object(field_data.into_iter().collect())),
            ..Default::default()
        }
    }
}
