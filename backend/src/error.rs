//! Error handling for the Agro Inference Platform
//!
//! Every failure is rendered as the standard inference envelope so clients
//! only ever parse one response shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{envelope_timestamp, InferenceEnvelope, InferenceError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Inference errors
    #[error(transparent)]
    Inference(#[from] InferenceError),

    // Request errors
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Inference(InferenceError::InvalidInput(_))
            | AppError::Inference(InferenceError::UnknownAction(_))
            | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(InferenceError::InsufficientData { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Inference(InferenceError::Computation { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Inference(err) => err.code(),
            AppError::MalformedRequest(_) => "MALFORMED_REQUEST",
        }
    }

    /// Build the failure envelope response, optionally with diagnostics
    pub fn into_envelope_response(self, expose_diagnostics: bool) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Error: {:?}", self);
        } else {
            tracing::warn!(code = self.code(), "Rejected request: {}", self);
        }

        let envelope: InferenceEnvelope<()> = InferenceEnvelope::failure(
            self.to_string(),
            self.code(),
            expose_diagnostics.then(|| format!("{:?}", self)),
            envelope_timestamp(chrono::Utc::now()),
        );

        (status, Json(envelope)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_envelope_response(false)
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(InferenceError::invalid_input("empty")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(InferenceError::UnknownAction("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(InferenceError::InsufficientData { required: 3, found: 1 }).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(InferenceError::computation("Yield prediction", "inf")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MalformedRequest("expected value".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_transparent_message() {
        let err = AppError::from(InferenceError::UnknownAction("train".into()));
        assert_eq!(err.to_string(), "Unknown action: train");
        assert_eq!(err.code(), "UNKNOWN_ACTION");
    }
}
