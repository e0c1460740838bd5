//! Response schemas and parsing for the chat endpoint

use crate::error::ErrorData;
use crate::finish_reason::map_finish_reason;
use crate::logprobs::{map_chat_logprobs, ChatLogProbs};
use crate::schema::UsageInfo;
use crate::traits::{ParsedResponse, ResponseParser};
use crate::utils::generate_id;
use onerouter_core::{Error, ToolCall, Usage};
use serde::Deserialize;

/// Buffered chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated choices; only the first is used
    pub choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<UsageInfo>,
}

/// One choice of a buffered chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message
    pub message: ChatResponseMessage,
    /// Upstream finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Log-probabilities when requested
    #[serde(default)]
    pub logprobs: Option<ChatLogProbs>,
}

/// Assistant message of a chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
    /// Requested tool calls
    #[serde(default)]
    pub tool_calls: Option<Vec<ChatToolCall>>,
}

/// A complete tool call in a chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatToolCall {
    /// Call id; some upstreams omit it
    #[serde(default)]
    pub id: Option<String>,
    /// The called function
    pub function: ChatFunctionCall,
}

/// Function name and arguments of a tool call
#[derive(Debug, Clone, Deserialize)]
pub struct ChatFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

/// One streamed event: a data chunk or an in-band error envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatChunk {
    /// Regular data chunk
    Data(ChatChunkData),
    /// Error reported mid-stream
    Error(ErrorData),
}

/// Data chunk of a streamed chat completion
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunkData {
    /// Choice deltas; empty on the trailing usage chunk
    pub choices: Vec<ChatChunkChoice>,
    /// Usage, usually on the last chunk only
    #[serde(default)]
    pub usage: Option<UsageInfo>,
}

/// Choice delta of a streamed chat completion
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunkChoice {
    /// Message delta
    #[serde(default)]
    pub delta: Option<ChatDelta>,
    /// Set on the final delta
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Log-probabilities of this delta
    #[serde(default)]
    pub logprobs: Option<ChatLogProbs>,
}

/// Message delta
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatDelta {
    /// Text delta
    #[serde(default)]
    pub content: Option<String>,
    /// Tool call fragments
    #[serde(default)]
    pub tool_calls: Option<Vec<ChatToolCallDelta>>,
}

/// Fragment of a streamed tool call
#[derive(Debug, Clone, Deserialize)]
pub struct ChatToolCallDelta {
    /// Position of the call this fragment belongs to
    pub index: usize,
    /// Call id, on the first fragment
    #[serde(default)]
    pub id: Option<String>,
    /// Call type, on the first fragment
    #[serde(rename = "type", default)]
    pub call_type: Option<String>,
    /// Function fragment
    #[serde(default)]
    pub function: Option<ChatFunctionDelta>,
}

/// Function fragment of a streamed tool call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatFunctionDelta {
    /// Function name, on the first fragment
    #[serde(default)]
    pub name: Option<String>,
    /// Argument text to append
    #[serde(default)]
    pub arguments: Option<String>,
}

/// Parses buffered chat responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatParser;

impl ResponseParser for ChatParser {
    type Wire = ChatResponse;

    fn parse_response(&self, response: ChatResponse) -> Result<ParsedResponse, Error> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::ResponseError {
                message: "No choice in chat response".to_string(),
            })?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                ToolCall::function(
                    call.id.unwrap_or_else(generate_id),
                    call.function.name,
                    call.function.arguments,
                )
            })
            .collect();

        let usage = response.usage.map(Usage::from).unwrap_or(Usage {
            prompt_tokens: 0,
            completion_tokens: 0,
        });

        Ok(ParsedResponse {
            text: choice.message.content,
            tool_calls,
            finish_reason: map_finish_reason(choice.finish_reason.as_deref()),
            usage,
            logprobs: map_chat_logprobs(choice.logprobs.as_ref()),
        })
    }
}
