//! Builder for provider construction
//!
//! All configuration methods return `self`, and `build()` is the terminal
//! method that validates the settings and constructs the provider.
//!
//! # Examples
//!
//! ```no_run
//! use onerouter_providers::OneRouterBuilder;
//! use serde_json::json;
//!
//! // Basic usage; the key is read from ONEROUTER_API_KEY per request
//! let router = OneRouterBuilder::new()
//!     .build()
//!     .expect("Failed to build provider");
//!
//! // With all options
//! # let custom_client = std::sync::Arc::new(onerouter_providers::http::ReqwestClient::new().unwrap());
//! let router = OneRouterBuilder::new()
//!     .base_url("https://gateway.internal/api/v1")
//!     .api_key("sk-or-...")
//!     .header("X-Title", "my-app")
//!     .strict()
//!     .extra_body_field("transforms", json!(["middle-out"]))
//!     .with_client(custom_client)
//!     .build()
//!     .expect("Failed to build provider");
//! ```

use crate::config::Compatibility;
use crate::http::{extend_headers, HttpClient};
use crate::provider::{OneRouter, OneRouterSettings};
use onerouter_core::Error;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Builder for constructing [`OneRouter`] providers
#[derive(Debug, Default)]
pub struct OneRouterBuilder {
    settings: OneRouterSettings,
}

impl OneRouterBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.api_key = Some(key.into());
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.headers.insert(name.into(), value.into());
        self
    }

    /// Add several headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.settings.headers.extend(headers);
        self
    }

    /// Set the compatibility mode
    pub fn compatibility(mut self, compatibility: Compatibility) -> Self {
        self.settings.compatibility = compatibility;
        self
    }

    /// Use strict compatibility
    pub fn strict(self) -> Self {
        self.compatibility(Compatibility::Strict)
    }

    /// Set a custom HTTP client
    ///
    /// Useful for testing or special networking requirements.
    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.settings.client = Some(client);
        self
    }

    /// Replace the fields merged into every request body
    pub fn extra_body(mut self, extra_body: Map<String, Value>) -> Self {
        self.settings.extra_body = extra_body;
        self
    }

    /// Add one field merged into every request body
    pub fn extra_body_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.extra_body.insert(key.into(), value);
        self
    }

    /// Build the provider
    ///
    /// Fails when the base URL is not an http(s) URL or a header cannot be
    /// sent over HTTP.
    pub fn build(self) -> Result<OneRouter, Error> {
        if let Some(base_url) = &self.settings.base_url {
            validate_base_url(base_url)?;
        }

        extend_headers(&mut HeaderMap::new(), &self.settings.headers)?;

        OneRouter::new(self.settings)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), Error> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::Configuration(format!(
            "Unsupported base URL scheme '{}': {}",
            scheme, base_url
        ))),
    }
}
