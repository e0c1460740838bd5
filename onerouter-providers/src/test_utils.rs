//! Test doubles for the HTTP transport

use crate::http::{HttpClient, HttpResponse};
use async_trait::async_trait;
use bytes::Bytes;
use onerouter_core::Error;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Mutex;

/// A request seen by [`RecordingClient`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Serves one canned body and records every request
pub struct RecordingClient {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingClient {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn post(&self, url: &str, headers: HeaderMap, body: &Value) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers,
            body: body.clone(),
        });

        let mut response_headers = HeaderMap::new();
        response_headers.insert("x-request-id", "req-1".parse().unwrap());
        let chunk: Result<Bytes, Error> = Ok(Bytes::from(self.body.clone()));

        Ok(HttpResponse {
            status: self.status,
            headers: response_headers,
            body: Box::pin(futures::stream::iter(vec![chunk])),
        })
    }
}
