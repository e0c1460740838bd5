//! Configuration shared by the models of one provider instance

use crate::constants::{API_KEY_ENV_VAR, PROVIDER_DESCRIPTION};
use crate::http::{create_headers, extend_headers, HttpClient};
use crate::utils::load_api_key;
use onerouter_core::Error;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How closely the upstream follows the reference API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// Send newer options such as `stream_options`
    Strict,
    /// Omit newer options; safe for third-party backends
    #[default]
    Compatible,
}

/// Configuration for a model
#[derive(Clone)]
pub struct ModelConfig {
    /// Provider id reported by the model
    pub provider: String,
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Explicit API key; the environment is consulted when absent
    pub api_key: Option<String>,
    /// Static headers added to every request
    pub headers: HashMap<String, String>,
    /// Compatibility mode
    pub compatibility: Compatibility,
    /// HTTP transport
    pub client: Arc<dyn HttpClient>,
    /// Fields merged into every request body
    pub extra_body: Map<String, Value>,
}

impl ModelConfig {
    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers for one request
    ///
    /// The API key is resolved here, so a missing key fails the call that
    /// needs it rather than provider construction.
    pub fn request_headers(&self, call_headers: &HashMap<String, String>) -> Result<HeaderMap, Error> {
        let api_key = load_api_key(self.api_key.as_deref(), API_KEY_ENV_VAR, PROVIDER_DESCRIPTION)?;
        let mut headers = create_headers(&api_key)?;
        extend_headers(&mut headers, &self.headers)?;
        extend_headers(&mut headers, call_headers)?;
        Ok(headers)
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("compatibility", &self.compatibility)
            .field("extra_body", &self.extra_body)
            .finish_non_exhaustive()
    }
}
