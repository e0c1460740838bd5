//! HTTP client abstraction and utilities

use crate::error;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt, TryStreamExt};
use onerouter_core::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::pin::Pin;
use std::time::Duration;

/// Type alias for response body streams
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// A response whose body has not been read yet
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// The body as a byte stream
    pub body: ResponseStream,
}

impl HttpResponse {
    /// Read the whole body
    pub async fn bytes(mut self) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.body.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }

    /// Read the whole body as text, replacing invalid UTF-8
    pub async fn text(self) -> Result<String, Error> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// HTTP transport used by the models
///
/// Swap in a custom implementation to intercept requests or to serve
/// canned responses in tests.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a JSON POST request and return the unread response
    async fn post(&self, url: &str, headers: HeaderMap, body: &Value)
        -> Result<HttpResponse, Error>;
}

/// Default HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(error::network_error)?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(error::network_error)?;

        Ok(HttpResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: Box::pin(response.bytes_stream().map_err(error::network_error)),
        })
    }
}

/// Helper to create the authorization and content headers
pub fn create_headers(api_key: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::Configuration(format!("Invalid API key: {}", e)))?,
    );

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

/// Insert string headers into a header map; later values replace earlier ones
pub fn extend_headers(
    headers: &mut HeaderMap,
    extra: &HashMap<String, String>,
) -> Result<(), Error> {
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Configuration(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Configuration(format!("Invalid value for header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(())
}

/// Flatten response headers into a string map, skipping non-UTF-8 values
pub fn header_map_to_hash_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
