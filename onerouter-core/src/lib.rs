//! Core traits and types for the OneRouter SDK
//!
//! This crate defines the uniform language-model interface that provider
//! implementations plug into: call options, prompts, tool definitions,
//! generation results and stream parts.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use model::{LanguageModel, ObjectGenerationMode};
pub use types::{
    options::{BuildError, CallOptions, CallOptionsBuilder, InputFormat, Mode},
    prompt::{AssistantContent, ImageData, Message, Role, ToolResultContent, UserContent},
    response::{
        CallWarning, FinishReason, GenerateResponse, LogProb, LogProbs, RawCall, RawResponse,
        TopLogProb, Usage,
    },
    stream::{PartStream, StreamAccumulator, StreamPart, StreamResponse},
    tool::{Tool, ToolCall, ToolChoice},
};
