//! Error types for the inference engines

use thiserror::Error;

/// Failures surfaced by the inference core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// A required field is missing, empty, or has the wrong type
    #[error("{0}")]
    InvalidInput(String),

    /// Not enough usable observations for stress analysis
    #[error("At least {required} observations required for stress analysis (found {found})")]
    InsufficientData { required: usize, found: usize },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A formula produced a value that cannot be reported
    #[error("{operation} failed: {reason}")]
    Computation {
        operation: &'static str,
        reason: String,
    },
}

impl InferenceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        InferenceError::InvalidInput(message.into())
    }

    pub fn computation(operation: &'static str, reason: impl Into<String>) -> Self {
        InferenceError::Computation {
            operation,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            InferenceError::InvalidInput(_) => "INVALID_INPUT",
            InferenceError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            InferenceError::UnknownAction(_) => "UNKNOWN_ACTION",
            InferenceError::Computation { .. } => "COMPUTATION_ERROR",
        }
    }

    /// True when the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        !matches!(self, InferenceError::Computation { .. })
    }
}

/// Result type alias for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;
