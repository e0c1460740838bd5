//! Response types for model calls

use crate::types::tool::ToolCall;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
}

impl Usage {
    /// Total tokens used
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Natural end of message or a stop sequence
    Stop,
    /// Hit the max_tokens limit
    Length,
    /// Content was filtered
    ContentFilter,
    /// Model decided to call a tool
    ToolCalls,
    /// Generation ended because of an error
    Error,
    /// Some other reason, e.g. a stream that never reported one
    Other,
    /// The upstream reason is not recognized
    Unknown,
}

/// One alternative token at a position
#[derive(Debug, Clone, PartialEq)]
pub struct TopLogProb {
    /// The token
    pub token: String,
    /// Its log-probability
    pub logprob: f64,
}

/// Log-probability information for one generated token
#[derive(Debug, Clone, PartialEq)]
pub struct LogProb {
    /// The generated token
    pub token: String,
    /// Its log-probability
    pub logprob: f64,
    /// Most likely alternatives at this position
    pub top_logprobs: Vec<TopLogProb>,
}

/// Log-probabilities for a whole generation
pub type LogProbs = Vec<LogProb>;

/// A non-fatal problem with the call settings
#[derive(Debug, Clone, PartialEq)]
pub enum CallWarning {
    /// A setting the endpoint does not support was ignored
    UnsupportedSetting {
        /// Name of the setting
        setting: String,
        /// Extra detail
        details: Option<String>,
    },
    /// Anything else
    Other {
        /// Warning text
        message: String,
    },
}

/// The request as it was sent upstream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCall {
    /// The prompt or message list
    pub raw_prompt: Value,
    /// Every other request field
    pub raw_settings: Map<String, Value>,
}

/// Response metadata from the HTTP layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    /// Response headers
    pub headers: HashMap<String, String>,
}

/// A complete response from a model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// The generated text, if any
    pub text: Option<String>,
    /// Tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Usage,
    /// Log-probabilities, when requested
    pub logprobs: Option<LogProbs>,
    /// What was sent
    pub raw_call: RawCall,
    /// HTTP response metadata
    pub raw_response: RawResponse,
    /// Non-fatal warnings
    pub warnings: Vec<CallWarning>,
}

impl GenerateResponse {
    /// The generated text, or an empty string
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Check if the response contains tool calls
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

impl fmt::Display for GenerateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())?;
        if !self.tool_calls.is_empty() {
            write!(f, " [+{} tool calls]", self.tool_calls.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::Length => write!(f, "length"),
            FinishReason::ContentFilter => write!(f, "content-filter"),
            FinishReason::ToolCalls => write!(f, "tool-calls"),
            FinishReason::Error => write!(f, "error"),
            FinishReason::Other => write!(f, "other"),
            FinishReason::Unknown => write!(f, "unknown"),
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Usage(prompt: {}, completion: {}, total: {})",
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens()
        )
    }
}
