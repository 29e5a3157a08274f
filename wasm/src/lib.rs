//! WebAssembly module for the Agro Inference Platform
//!
//! Provides client-side computation for:
//! - Yield prediction
//! - Vegetation stress analysis
//! - Irrigation optimization
//! - The full action-dispatch envelope, for offline use

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for Rust consumers of this crate
pub use shared::models::*;
pub use shared::types::*;

use shared::{
    AnalyzeStressInput, InferenceError, InferenceResult, OptimizeIrrigationInput,
    PredictYieldInput,
};

fn to_json<T: Serialize>(value: &T) -> InferenceResult<String> {
    serde_json::to_string(value)
        .map_err(|e| InferenceError::computation("Result serialization", e.to_string()))
}

fn parse_json<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> InferenceResult<T> {
    serde_json::from_str(json)
        .map_err(|e| InferenceError::invalid_input(format!("Invalid {} JSON: {}", what, e)))
}

/// Log to the browser console and convert for the JS caller
fn js_error(err: InferenceError) -> JsValue {
    let message = err.to_string();
    let line = JsValue::from_str(&format!("[{}] {}", err.code(), message));
    if err.is_client_error() {
        web_sys::console::warn_1(&line);
    } else {
        web_sys::console::error_1(&line);
    }
    JsValue::from_str(&message)
}

fn now_timestamp() -> String {
    let now = DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64)
        .unwrap_or_default();
    envelope_timestamp(now)
}

fn predict_yield_json(features_json: &str, crop_type: &str) -> InferenceResult<String> {
    let input = PredictYieldInput::new(parse_json("features", features_json)?, crop_type)?;
    to_json(&shared::predict_yield(&input.features, &input.crop_type)?)
}

fn analyze_stress_json(satellite_json: &str) -> InferenceResult<String> {
    let input = AnalyzeStressInput::new(parse_json("satellite data", satellite_json)?)?;
    to_json(&shared::analyze_stress_patterns(&input.satellite_data)?)
}

fn optimize_irrigation_json(field_json: &str) -> InferenceResult<String> {
    let field_data: BTreeMap<String, Value> = parse_json("field data", field_json)?;
    let field = OptimizeIrrigationInput::new(field_data)?.field_state()?;
    to_json(&shared::optimize_irrigation(&field)?)
}

/// Dispatch a request and always produce an envelope
///
/// Diagnostics are included on failure since the caller is the local page.
fn run_inference_at(request_json: &str, timestamp: String) -> String {
    let outcome = parse_json::<InferenceRequest>("request", request_json)
        .and_then(|request| shared::run_inference(&request));

    let rendered = match outcome {
        Ok(outcome) => serde_json::to_string(&InferenceEnvelope::success(outcome, timestamp.clone())),
        Err(err) => serde_json::to_string(&InferenceEnvelope::<()>::from_error(
            &err,
            true,
            timestamp.clone(),
        )),
    };

    rendered.unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error": e.to_string(),
            "code": "COMPUTATION_ERROR",
            "timestamp": timestamp,
        })
        .to_string()
    })
}

/// Predict yield from a JSON feature map; returns the prediction as JSON
#[wasm_bindgen]
pub fn predict_yield(features_json: &str, crop_type: &str) -> Result<String, JsValue> {
    predict_yield_json(features_json, crop_type).map_err(js_error)
}

/// Analyze a JSON array of `{date, ndvi}` observations
#[wasm_bindgen]
pub fn analyze_stress(satellite_json: &str) -> Result<String, JsValue> {
    analyze_stress_json(satellite_json).map_err(js_error)
}

/// Recommend irrigation for a non-empty JSON field state (missing fields take defaults)
#[wasm_bindgen]
pub fn optimize_irrigation(field_json: &str) -> Result<String, JsValue> {
    optimize_irrigation_json(field_json).map_err(js_error)
}

/// Run a full inference request; the result is always a JSON envelope
#[wasm_bindgen]
pub fn run_inference(request_json: &str) -> String {
    run_inference_at(request_json, now_timestamp())
}

/// Version of the inference engines compiled into this module
#[wasm_bindgen]
pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
