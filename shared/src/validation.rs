//! Validation of inference payloads
//!
//! Each action's payload is lifted out of the raw request into a typed input
//! and checked before any computation runs.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::error::{InferenceError, InferenceResult};
use crate::models::{
    FeatureVector, FieldState, InferenceRequest, SatelliteObservation, DEFAULT_CROP_TYPE,
};

// ============================================================================
// Action Payloads
// ============================================================================

#[derive(Debug, Clone, Validate)]
pub struct PredictYieldInput {
    #[validate(length(min = 1, message = "Features are required for yield prediction"))]
    pub features: BTreeMap<String, f64>,
    pub crop_type: String,
}

#[derive(Debug, Clone, Validate)]
pub struct AnalyzeStressInput {
    #[validate(length(min = 1, message = "Satellite data is required for stress analysis"))]
    pub satellite_data: Vec<SatelliteObservation>,
}

#[derive(Debug, Clone, Validate)]
pub struct OptimizeIrrigationInput {
    #[validate(length(
        min = 1,
        message = "Field data is required for irrigation optimization"
    ))]
    pub field_data: BTreeMap<String, Value>,
}

impl PredictYieldInput {
    pub fn new(features: FeatureVector, crop_type: impl Into<String>) -> InferenceResult<Self> {
        let input = Self {
            features,
            crop_type: crop_type.into(),
        };
        input.validate().map_err(into_invalid_input)?;
        Ok(input)
    }

    pub fn from_request(request: &InferenceRequest) -> InferenceResult<Self> {
        let features = lift_payload("features", request.features.as_ref())?;
        let crop_type: Option<String> = lift_payload("crop_type", request.crop_type.as_ref())?;
        Self::new(
            features,
            crop_type.unwrap_or_else(|| DEFAULT_CROP_TYPE.to_string()),
        )
    }
}

impl AnalyzeStressInput {
    pub fn new(satellite_data: Vec<SatelliteObservation>) -> InferenceResult<Self> {
        let input = Self { satellite_data };
        input.validate().map_err(into_invalid_input)?;
        Ok(input)
    }

    pub fn from_request(request: &InferenceRequest) -> InferenceResult<Self> {
        Self::new(lift_payload(
            "satellite_data",
            request.satellite_data.as_ref(),
        )?)
    }
}

impl OptimizeIrrigationInput {
    pub fn new(field_data: BTreeMap<String, Value>) -> InferenceResult<Self> {
        let input = Self { field_data };
        input.validate().map_err(into_invalid_input)?;
        Ok(input)
    }

    pub fn from_request(request: &InferenceRequest) -> InferenceResult<Self> {
        Self::new(lift_payload("field_data", request.field_data.as_ref())?)
    }

    /// Apply defaults for missing fields and check the types of present ones
    pub fn field_state(&self) -> InferenceResult<FieldState> {
        let object = self
            .field_data
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<serde_json::Map<String, Value>>();

        serde_json::from_value(Value::Object(object))
            .map_err(|e| InferenceError::invalid_input(format!("Invalid field data: {}", e)))
    }
}

/// Lift one action's raw payload into its typed form; `null` counts as missing
fn lift_payload<T>(name: &str, raw: Option<&Value>) -> InferenceResult<T>
where
    T: DeserializeOwned + Default,
{
    match raw {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value)
            .map_err(|e| InferenceError::invalid_input(format!("Invalid {}: {}", name, e))),
    }
}

/// Collapse validator errors into the first human-readable message
fn into_invalid_input(errors: ValidationErrors) -> InferenceError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());
    InferenceError::InvalidInput(message)
}

// ============================================================================
// Numeric Checks
// ============================================================================

/// Reject NaN and infinite values produced by a formula
pub fn ensure_finite(operation: &'static str, name: &str, value: f64) -> InferenceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InferenceError::computation(
            operation,
            format!("{} is not a finite number ({})", name, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predict_yield_input_defaults_crop() {
        let request: InferenceRequest = serde_json::from_value(json!({
            "action": "predict_yield",
            "features": {"soil_ph": 6.5}
        }))
        .unwrap();

        let input = PredictYieldInput::from_request(&request).unwrap();
        assert_eq!(input.crop_type, "corn");
        assert_eq!(input.features.len(), 1);
    }

    #[test]
    fn test_predict_yield_input_requires_features() {
        let request = InferenceRequest::predict_yield(FeatureVector::new(), "corn");
        assert_eq!(
            PredictYieldInput::from_request(&request).unwrap_err(),
            InferenceError::InvalidInput("Features are required for yield prediction".into())
        );

        let missing = InferenceRequest::default();
        assert!(PredictYieldInput::from_request(&missing).is_err());
    }

    #[test]
    fn test_stress_input_requires_observations() {
        let request = InferenceRequest::analyze_stress(Vec::new());
        assert_eq!(
            AnalyzeStressInput::from_request(&request).unwrap_err(),
            InferenceError::InvalidInput("Satellite data is required for stress analysis".into())
        );
    }

    #[test]
    fn test_irrigation_input_requires_field_data() {
        let request = InferenceRequest::optimize_irrigation(BTreeMap::new());
        assert_eq!(
            OptimizeIrrigationInput::from_request(&request).unwrap_err(),
            InferenceError::InvalidInput(
                "Field data is required for irrigation optimization".into()
            )
        );
    }

    #[test]
    fn test_irrigation_field_state_applies_defaults() {
        let mut field_data = BTreeMap::new();
        field_data.insert("soil_moisture".to_string(), json!(0.22));
        let input =
            OptimizeIrrigationInput::from_request(&InferenceRequest::optimize_irrigation(field_data))
                .unwrap();

        let state = input.field_state().unwrap();
        assert_eq!(state.soil_moisture, 0.22);
        assert_eq!(state.field_capacity, 0.4);
        assert_eq!(state.crop_stage, "vegetative");
    }

    #[test]
    fn test_irrigation_field_state_rejects_wrong_types() {
        let mut field_data = BTreeMap::new();
        field_data.insert("soil_moisture".to_string(), json!("wet"));
        let input =
            OptimizeIrrigationInput::from_request(&InferenceRequest::optimize_irrigation(field_data))
                .unwrap();

        match input.field_state() {
            Err(InferenceError::InvalidInput(msg)) => assert!(msg.starts_with("Invalid field data")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_ill_typed_payloads_are_invalid_input() {
        let request: InferenceRequest = serde_json::from_value(json!({
            "action": "predict_yield",
            "features": "all",
            "crop_type": 7
        }))
        .unwrap();
        match PredictYieldInput::from_request(&request) {
            Err(InferenceError::InvalidInput(msg)) => assert!(msg.starts_with("Invalid features")),
            other => panic!("expected invalid input, got {:?}", other),
        }

        let request: InferenceRequest = serde_json::from_value(json!({
            "action": "optimize_irrigation",
            "field_data": [0.3]
        }))
        .unwrap();
        match OptimizeIrrigationInput::from_request(&request) {
            Err(InferenceError::InvalidInput(msg)) => {
                assert!(msg.starts_with("Invalid field_data"))
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_irrigation_input_new_requires_entries() {
        assert_eq!(
            OptimizeIrrigationInput::new(BTreeMap::new()).unwrap_err().code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("Yield prediction", "prediction", 4.2), Ok(4.2));
        assert!(ensure_finite("Yield prediction", "prediction", f64::INFINITY).is_err());
        assert!(ensure_finite("Yield prediction", "prediction", f64::NAN).is_err());
    }
}
