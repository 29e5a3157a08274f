//! HTTP handler for the inference endpoint

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use shared::{envelope_timestamp, InferenceEnvelope, InferenceOutcome, InferenceRequest};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Run a yield, stress or irrigation inference selected by `action`
pub async fn run_inference(
    State(state): State<AppState>,
    payload: Result<Json<InferenceRequest>, JsonRejection>,
) -> Response {
    match execute(payload) {
        Ok(outcome) => Json(InferenceEnvelope::success(
            outcome,
            envelope_timestamp(chrono::Utc::now()),
        ))
        .into_response(),
        Err(err) => err.into_envelope_response(state.config.inference.expose_diagnostics),
    }
}

fn execute(payload: Result<Json<InferenceRequest>, JsonRejection>) -> AppResult<InferenceOutcome> {
    let Json(request) = payload.map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("inference", %request_id, action = %request.action);
    let _guard = span.enter();

    let started = Instant::now();
    let outcome = shared::run_inference(&request)?;
    let elapsed_us = started.elapsed().as_micros() as u64;

    match &outcome {
        InferenceOutcome::Yield(result) => tracing::info!(
            elapsed_us,
            predicted_yield = result.predicted_yield,
            confidence = result.confidence,
            "Yield prediction completed"
        ),
        InferenceOutcome::Stress(result) => tracing::info!(
            elapsed_us,
            stress_level = result.stress_level.as_str(),
            anomalies = result.anomalies.len(),
            "Stress analysis completed"
        ),
        InferenceOutcome::Irrigation(result) => tracing::info!(
            elapsed_us,
            urgency = result.urgency.as_str(),
            recommended_amount = result.recommended_amount,
            "Irrigation optimization completed"
        ),
    }

    Ok(outcome)
}
