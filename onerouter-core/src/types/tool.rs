//! Tool/function calling types

use serde_json::Value;

/// A tool that can be called by the model
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
    /// JSON Schema for the parameters
    pub parameters: Value,
}

impl Tool {
    /// Create a function tool
    pub fn function(name: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How the model should use tools
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolChoice {
    /// Let the model decide
    #[default]
    Auto,
    /// Never call tools
    None,
    /// Must call a tool
    Required,
    /// Call a specific tool
    Tool {
        /// Name of the tool to call
        tool_name: String,
    },
}

/// A complete tool call requested by the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Call type, always `function` for this API
    pub tool_call_type: String,
    /// Unique ID for this call
    pub tool_call_id: String,
    /// Name of the tool to call
    pub tool_name: String,
    /// JSON-encoded arguments
    pub args: String,
}

impl ToolCall {
    /// Create a function call
    pub fn function(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: impl Into<String>,
    ) -> Self {
        Self {
            tool_call_type: "function".to_string(),
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            args: args.into(),
        }
    }
}
