//! Error types for the OneRouter SDK

use std::error::Error as StdError;
use std::fmt;

/// The main error type for all model calls
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Network-related errors
    Network {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The upstream API reported a failure, either through a non-success
    /// status or through an error object embedded in a stream
    Api {
        /// Message taken from the upstream error envelope
        message: String,
        /// Request URL
        url: String,
        /// HTTP status code, absent for in-stream errors
        status_code: Option<u16>,
        /// Raw response body, if one was read
        response_body: Option<String>,
        /// Parsed error envelope, if the body matched it
        data: Option<serde_json::Value>,
        /// Whether the status usually indicates a transient failure
        is_retryable: bool,
    },

    /// Serialization/deserialization errors, including responses that do
    /// not match the expected schema
    Serialization {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The model cannot express the requested capability
    UnsupportedFunctionality {
        /// Name of the capability, e.g. `tools` or `object-json mode`
        functionality: String,
    },

    /// The prompt cannot be converted for the target endpoint
    InvalidPrompt(String),

    /// A response was well-formed JSON but semantically invalid
    InvalidResponseData(String),

    /// Authentication errors
    Authentication(String),

    /// Configuration errors
    Configuration(String),

    /// Response errors
    ResponseError {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an unsupported functionality error
    pub fn unsupported(functionality: impl Into<String>) -> Self {
        Error::UnsupportedFunctionality {
            functionality: functionality.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network { message, .. } => write!(f, "Network error: {}", message),
            Error::Api {
                message,
                status_code: Some(status),
                ..
            } => write!(f, "API error ({}): {}", status, message),
            Error::Api { message, .. } => write!(f, "API error: {}", message),
            Error::Serialization { message, .. } => write!(f, "Serialization error: {}", message),
            Error::UnsupportedFunctionality { functionality } => {
                write!(f, "'{}' functionality not supported", functionality)
            }
            Error::InvalidPrompt(msg) => write!(f, "Invalid prompt: {}", msg),
            Error::InvalidResponseData(msg) => write!(f, "Invalid response data: {}", msg),
            Error::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::ResponseError { message } => write!(f, "Response error: {}", message),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Network { source, .. } | Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

/// Result type alias for model calls
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
