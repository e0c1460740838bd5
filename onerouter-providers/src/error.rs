//! Upstream error envelope and error conversions

use onerouter_core::Error;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON error envelope returned by OpenAI-compatible APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    /// The error body
    pub error: ErrorDetail,
}

/// Contents of an [`ErrorData`] envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,
    /// Error category, e.g. `invalid_request_error`
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// The offending parameter, if any
    #[serde(default)]
    pub param: Option<Value>,
    /// Machine-readable code; some upstreams send numbers here
    #[serde(default)]
    pub code: Option<Value>,
}

/// Whether a status usually indicates a transient failure
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 409 | 429) || status.is_server_error()
}

/// Map a non-success response into an API error
///
/// The message comes from the error envelope when the body matches it,
/// and falls back to the status text otherwise. `body` is `None` when the
/// body could not be read.
pub fn failed_response_error(url: &str, status: StatusCode, body: Option<String>) -> Error {
    let parsed = body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .and_then(|body| serde_json::from_str::<ErrorData>(body).ok());

    let message = match &parsed {
        Some(data) => data.error.message.clone(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    Error::Api {
        message,
        url: url.to_string(),
        status_code: Some(status.as_u16()),
        response_body: body,
        data: parsed.and_then(|data| serde_json::to_value(data).ok()),
        is_retryable: is_retryable_status(status),
    }
}

/// Map an error envelope received inside a stream into an API error
pub fn stream_error(url: &str, data: ErrorData) -> Error {
    Error::Api {
        message: data.error.message.clone(),
        url: url.to_string(),
        status_code: None,
        response_body: None,
        data: serde_json::to_value(data).ok(),
        is_retryable: false,
    }
}

/// Convert network errors to core errors
pub fn network_error(error: reqwest::Error) -> Error {
    Error::Network {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Convert serialization errors to core errors
pub fn serialization_error(error: serde_json::Error) -> Error {
    Error::Serialization {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}
