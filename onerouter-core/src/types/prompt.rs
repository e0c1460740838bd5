//! Prompt message types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Role {
    /// System message (instructions)
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool message (function result)
    Tool,
}

/// Image payload of a user message part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageData {
    /// Remote image URL
    Url(String),
    /// Base64-encoded image bytes
    Base64(String),
}

/// A part of a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserContent {
    /// Plain text
    Text(String),
    /// An image
    Image {
        /// The image payload
        data: ImageData,
        /// MIME type (e.g., "image/png")
        mime_type: Option<String>,
    },
}

/// A part of an assistant message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssistantContent {
    /// Plain text
    Text(String),
    /// A tool call the assistant made earlier in the conversation
    ToolCall {
        /// ID of the call
        tool_call_id: String,
        /// Name of the tool
        tool_name: String,
        /// Arguments as a JSON value
        args: Value,
    },
}

/// The result of a tool call, sent back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultContent {
    /// ID of the call this result answers
    pub tool_call_id: String,
    /// Name of the tool
    pub tool_name: String,
    /// Result payload
    pub result: Value,
    /// Whether the tool failed
    pub is_error: bool,
}

/// A message in a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System instructions
    System {
        /// Instruction text
        content: String,
    },
    /// User input
    User {
        /// Message parts
        content: Vec<UserContent>,
    },
    /// Earlier model output
    Assistant {
        /// Message parts
        content: Vec<AssistantContent>,
    },
    /// Tool results
    Tool {
        /// One entry per answered call
        content: Vec<ToolResultContent>,
    },
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Message::System {
            content: text.into(),
        }
    }

    /// Create a user message with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Message::User {
            content: vec![UserContent::Text(text.into())],
        }
    }

    /// Create an assistant message with a single text part
    pub fn assistant(text: impl Into<String>) -> Self {
        Message::Assistant {
            content: vec![AssistantContent::Text(text.into())],
        }
    }

    /// Create a tool message answering one call
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        result: Value,
    ) -> Self {
        Message::Tool {
            content: vec![ToolResultContent {
                tool_call_id: tool_call_id.into(),
                tool_name: tool_name.into(),
                result,
                is_error: false,
            }],
        }
    }

    /// The role of this message
    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::User { .. } => Role::User,
            Message::Assistant { .. } => Role::Assistant,
            Message::Tool { .. } => Role::Tool,
        }
    }
}

impl UserContent {
    /// Get text content if this is a Text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            UserContent::Text(s) => Some(s),
            UserContent::Image { .. } => None,
        }
    }
}

impl From<&str> for UserContent {
    fn from(s: &str) -> Self {
        UserContent::Text(s.to_string())
    }
}

impl From<String> for UserContent {
    fn from(s: String) -> Self {
        UserContent::Text(s)
    }
}
