//! Call options for a single generation request

use crate::types::prompt::Message;
use crate::types::tool::{Tool, ToolChoice};
use std::collections::HashMap;
use thiserror::Error;

/// How the caller supplied the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// A bare prompt string wrapped in a single user message
    Prompt,
    /// An explicit message list
    #[default]
    Messages,
}

/// What kind of output the caller expects
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Free-form text, optionally with tools
    Regular {
        /// Tools the model may call
        tools: Vec<Tool>,
        /// How the model should pick a tool
        tool_choice: Option<ToolChoice>,
    },
    /// A JSON object, optionally matching a schema
    ObjectJson {
        /// JSON Schema of the object
        schema: Option<serde_json::Value>,
        /// Name of the object
        name: Option<String>,
        /// Description of the object
        description: Option<String>,
    },
    /// A JSON object produced through a forced tool call
    ObjectTool {
        /// The tool whose arguments form the object
        tool: Tool,
    },
    /// Output constrained by a grammar
    ObjectGrammar {
        /// The grammar definition
        grammar: String,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Regular {
            tools: Vec::new(),
            tool_choice: None,
        }
    }
}

/// Options for one model call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallOptions {
    /// How the prompt was supplied
    pub input_format: InputFormat,
    /// Expected output kind
    pub mode: Mode,
    /// The prompt messages
    pub prompt: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for randomness
    pub temperature: Option<f64>,
    /// Top-p nucleus sampling
    pub top_p: Option<f64>,
    /// Top-k sampling
    pub top_k: Option<u32>,
    /// Frequency penalty
    pub frequency_penalty: Option<f64>,
    /// Presence penalty
    pub presence_penalty: Option<f64>,
    /// Random seed for deterministic generation
    pub seed: Option<i64>,
    /// Stop sequences
    pub stop_sequences: Vec<String>,
    /// Extra HTTP headers for this call
    pub headers: HashMap<String, String>,
}

impl CallOptions {
    /// Create a new options builder
    pub fn builder() -> CallOptionsBuilder {
        CallOptionsBuilder::default()
    }

    /// Options for a bare text prompt
    pub fn from_prompt(text: impl Into<String>) -> Self {
        Self {
            input_format: InputFormat::Prompt,
            prompt: vec![Message::user(text)],
            ..Self::default()
        }
    }

    /// Options for a message list
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            input_format: InputFormat::Messages,
            prompt: messages,
            ..Self::default()
        }
    }
}

/// Builder for CallOptions
#[derive(Default)]
pub struct CallOptionsBuilder {
    options: CallOptions,
}

impl CallOptionsBuilder {
    /// Use a bare text prompt
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.options.input_format = InputFormat::Prompt;
        self.options.prompt = vec![Message::user(text)];
        self
    }

    /// Add a message
    pub fn message(mut self, message: Message) -> Self {
        self.options.input_format = InputFormat::Messages;
        self.options.prompt.push(message);
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.options.input_format = InputFormat::Messages;
        self.options.prompt.extend(messages);
        self
    }

    /// Set the mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Add a tool; switches to regular mode
    pub fn tool(mut self, tool: Tool) -> Self {
        match &mut self.options.mode {
            Mode::Regular { tools, .. } => tools.push(tool),
            mode => {
                *mode = Mode::Regular {
                    tools: vec![tool],
                    tool_choice: None,
                }
            }
        }
        self
    }

    /// Set the tool choice; switches to regular mode
    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        match &mut self.options.mode {
            Mode::Regular { tool_choice, .. } => *tool_choice = Some(choice),
            mode => {
                *mode = Mode::Regular {
                    tools: Vec::new(),
                    tool_choice: Some(choice),
                }
            }
        }
        self
    }

    /// Set maximum tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.options.max_tokens = Some(tokens);
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f64) -> Self {
        self.options.temperature = Some(temp);
        self
    }

    /// Set top-p
    pub fn top_p(mut self, p: f64) -> Self {
        self.options.top_p = Some(p);
        self
    }

    /// Set top-k
    pub fn top_k(mut self, k: u32) -> Self {
        self.options.top_k = Some(k);
        self
    }

    /// Set frequency penalty
    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.options.frequency_penalty = Some(penalty);
        self
    }

    /// Set presence penalty
    pub fn presence_penalty(mut self, penalty: f64) -> Self {
        self.options.presence_penalty = Some(penalty);
        self
    }

    /// Set the seed
    pub fn seed(mut self, seed: i64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Set stop sequences
    pub fn stop_sequences(mut self, sequences: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.stop_sequences = sequences.into_iter().map(Into::into).collect();
        self
    }

    /// Add an HTTP header for this call
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    /// Build the options
    pub fn build(self) -> CallOptions {
        self.options
    }

    /// Try to build the options, returning an error if validation fails
    pub fn try_build(self) -> Result<CallOptions, BuildError> {
        if self.options.prompt.is_empty() {
            return Err(BuildError::EmptyPrompt);
        }
        Ok(self.options)
    }
}

/// Errors that can occur when building call options
#[derive(Debug, Error)]
pub enum BuildError {
    /// A call needs at least one prompt message
    #[error("Call options must contain at least one prompt message")]
    EmptyPrompt,
}
