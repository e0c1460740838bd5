//! JSON and event-stream calls on top of [`HttpClient`]

use crate::error::{failed_response_error, serialization_error};
use crate::http::{header_map_to_hash_map, HttpClient, HttpResponse};
use eventsource_stream::{EventStreamError, Eventsource};
use futures::{future, Stream, StreamExt};
use onerouter_core::Error;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::pin::Pin;
use tracing::{debug, trace, warn};

/// Parsed events of a server-sent event stream
pub type EventStream<T> = Pin<Box<dyn Stream<Item = Result<T, Error>> + Send>>;

/// A successful API response
pub struct ApiResponse<T> {
    /// Response headers
    pub headers: HashMap<String, String>,
    /// The parsed body
    pub value: T,
}

/// POST a JSON body and parse a JSON response
pub async fn post_json_to_api<T: DeserializeOwned>(
    client: &dyn HttpClient,
    url: &str,
    headers: HeaderMap,
    body: &Value,
) -> Result<ApiResponse<T>, Error> {
    debug!(url = %url, stream = false, "Sending request");

    let response = check_status(url, client.post(url, headers, body).await?).await?;
    let headers = header_map_to_hash_map(&response.headers);
    let bytes = response.bytes().await?;
    trace!(body = %String::from_utf8_lossy(&bytes), "Received response");

    let value = serde_json::from_slice(&bytes).map_err(serialization_error)?;
    Ok(ApiResponse { headers, value })
}

/// POST a JSON body and parse the response as a stream of JSON events
///
/// Every `data` field is parsed into `T`; the `[DONE]` sentinel and empty
/// events are skipped. Parse failures are yielded as errors so the caller
/// decides how to surface them.
pub async fn post_json_to_event_stream<T>(
    client: &dyn HttpClient,
    url: &str,
    headers: HeaderMap,
    body: &Value,
) -> Result<ApiResponse<EventStream<T>>, Error>
where
    T: DeserializeOwned + Send + 'static,
{
    debug!(url = %url, stream = true, "Sending request");

    let response = check_status(url, client.post(url, headers, body).await?).await?;
    let headers = header_map_to_hash_map(&response.headers);

    let events = response.body.eventsource().filter_map(|event| {
        future::ready(match event {
            Ok(event) if event.data == "[DONE]" || event.data.trim().is_empty() => None,
            Ok(event) => {
                trace!(data = %event.data, "Received event");
                Some(serde_json::from_str::<T>(&event.data).map_err(serialization_error))
            }
            Err(EventStreamError::Transport(error)) => Some(Err(error)),
            Err(error) => Some(Err(Error::Serialization {
                message: format!("Malformed event stream: {}", error),
                source: None,
            })),
        })
    });

    Ok(ApiResponse {
        headers,
        value: Box::pin(events),
    })
}

async fn check_status(url: &str, response: HttpResponse) -> Result<HttpResponse, Error> {
    if response.status.is_success() {
        return Ok(response);
    }

    let status = response.status;
    let body = match response.text().await {
        Ok(body) => Some(body),
        Err(error) => {
            warn!(url = %url, status = status.as_u16(), error = %error, "Failed to read error response body");
            None
        }
    };
    debug!(url = %url, status = status.as_u16(), "Request failed");
    Err(failed_response_error(url, status, body))
}
