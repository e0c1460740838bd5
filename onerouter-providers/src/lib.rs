//! OneRouter language models over the OpenAI-compatible HTTP API
//!
//! [`OneRouter`] creates [`ChatModel`]s and [`CompletionModel`]s. Both
//! implement [`onerouter_core::LanguageModel`]: they translate call options
//! into the upstream wire format, send exactly one request, and map the
//! buffered or streamed result back.

#![warn(missing_docs)]

pub mod api;
pub mod builder;
pub mod chat;
pub mod completion;
pub mod config;
pub mod constants;
pub mod error;
pub mod finish_reason;
pub mod http;
pub mod logprobs;
pub mod provider;
pub mod schema;
pub mod stream;
pub mod traits;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use builder::OneRouterBuilder;
pub use chat::{ChatModel, ChatSettings};
pub use completion::{CompletionModel, CompletionSettings};
pub use config::{Compatibility, ModelConfig};
pub use http::{HttpClient, ReqwestClient};
pub use logprobs::Logprobs;
pub use provider::{OneRouter, OneRouterSettings};

// Re-export common traits
pub use traits::{RequestConverter, ResponseParser};
