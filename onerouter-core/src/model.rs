//! Core language-model trait

use crate::error::Result;
use crate::types::options::CallOptions;
use crate::types::response::GenerateResponse;
use crate::types::stream::StreamResponse;
use async_trait::async_trait;

/// How a model prefers to produce structured objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectGenerationMode {
    /// Native JSON output
    Json,
    /// A forced tool call whose arguments are the object
    Tool,
    /// Grammar-constrained decoding
    Grammar,
}

/// The uniform interface every model implementation exposes
///
/// A model translates [`CallOptions`] into its endpoint's wire format,
/// performs exactly one HTTP call and maps the result back. It keeps no
/// state between calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Version of the interface this model implements
    fn specification_version(&self) -> &'static str {
        "v1"
    }

    /// Provider identifier, e.g. `onerouter.chat`
    fn provider(&self) -> &str;

    /// Model identifier sent upstream
    fn model_id(&self) -> &str;

    /// Preferred mode for structured-object generation, if any
    fn default_object_generation_mode(&self) -> Option<ObjectGenerationMode> {
        None
    }

    /// Generate a complete response
    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResponse>;

    /// Generate a stream of parts
    ///
    /// Failures after the stream has started are delivered as
    /// [`StreamPart::Error`](crate::StreamPart::Error) items, so partial
    /// output is never lost.
    async fn do_stream(&self, options: CallOptions) -> Result<StreamResponse>;
}
