//! Common traits for the request and response pipeline

use crate::error::serialization_error;
use onerouter_core::{
    CallOptions, CallWarning, Error, FinishReason, LogProbs, RawCall, ToolCall, Usage,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A request body under construction plus the warnings it produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestArgs {
    /// The JSON body
    pub body: Map<String, Value>,
    /// Settings that were ignored
    pub warnings: Vec<CallWarning>,
}

impl RequestArgs {
    /// Set a field, leaving it out when the value is absent
    pub fn set<T: Serialize>(&mut self, key: &str, value: Option<T>) -> Result<(), Error> {
        if let Some(value) = value {
            let value = serde_json::to_value(value).map_err(serialization_error)?;
            self.body.insert(key.to_string(), value);
        }
        Ok(())
    }

    /// Merge entries over the body; existing keys are replaced
    pub fn merge(&mut self, extra: &Map<String, Value>) {
        for (key, value) in extra {
            self.body.insert(key.clone(), value.clone());
        }
    }

    /// Record a setting the endpoint ignores
    pub fn warn_unsupported(&mut self, setting: &str) {
        self.warnings.push(CallWarning::UnsupportedSetting {
            setting: setting.to_string(),
            details: None,
        });
    }

    /// Split the body into the prompt field and the remaining settings
    pub fn raw_call(&self, prompt_key: &str) -> RawCall {
        let mut raw_settings = self.body.clone();
        let raw_prompt = raw_settings.remove(prompt_key).unwrap_or(Value::Null);
        RawCall {
            raw_prompt,
            raw_settings,
        }
    }

    /// The body as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// The parts of a buffered response a parser extracts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Generated text
    pub text: Option<String>,
    /// Requested tool calls
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Usage,
    /// Log-probabilities
    pub logprobs: Option<LogProbs>,
}

/// Convert call options into an endpoint's request body
pub trait RequestConverter: Send + Sync {
    /// Build the request body, failing before any network call when the
    /// options ask for something the endpoint cannot express
    fn convert_request(&self, options: &CallOptions) -> Result<RequestArgs, Error>;
}

/// Parse an endpoint's buffered response
pub trait ResponseParser: Send + Sync {
    /// The response schema
    type Wire: DeserializeOwned;

    /// Extract the generic result from the parsed body
    fn parse_response(&self, response: Self::Wire) -> Result<ParsedResponse, Error>;
}
