//! Response envelope shared by every transport

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::InferenceError;

/// Timestamp format used in envelopes (UTC, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn envelope_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Success or failure wrapper around an inference result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InferenceEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Diagnostic detail, only when enabled by the transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
    pub timestamp: String,
}

impl<T> InferenceEnvelope<T> {
    pub fn success(data: T, timestamp: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            traceback: None,
            timestamp,
        }
    }

    pub fn failure(
        message: impl Into<String>,
        code: impl Into<String>,
        traceback: Option<String>,
        timestamp: String,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code.into()),
            traceback,
            timestamp,
        }
    }

    pub fn from_error(error: &InferenceError, with_traceback: bool, timestamp: String) -> Self {
        Self::failure(
            error.to_string(),
            error.code(),
            with_traceback.then(|| format!("{:?}", error)),
            timestamp,
        )
    }
}
