//! Streaming types for incremental responses

use crate::error::Error;
use crate::types::response::{CallWarning, FinishReason, LogProbs, RawCall, RawResponse, Usage};
use crate::types::tool::ToolCall;
use std::pin::Pin;

/// One record of a generation stream
#[derive(Debug)]
pub enum StreamPart {
    /// A fragment of generated text
    TextDelta {
        /// The text fragment
        text_delta: String,
    },
    /// A fragment of tool-call arguments
    ToolCallDelta {
        /// Call type, always `function`
        tool_call_type: String,
        /// ID of the call being built
        tool_call_id: String,
        /// Name of the tool
        tool_name: String,
        /// Argument text appended by this fragment
        args_text_delta: String,
    },
    /// A tool call whose arguments are complete
    ToolCall(ToolCall),
    /// End of the stream
    Finish {
        /// Why generation stopped
        finish_reason: FinishReason,
        /// Last usage reported upstream, if any
        usage: Option<Usage>,
        /// All log-probabilities seen, if any
        logprobs: Option<LogProbs>,
    },
    /// A failure inside the stream
    Error(Error),
}

/// A boxed stream of parts
pub type PartStream = Pin<Box<dyn futures_core::Stream<Item = StreamPart> + Send>>;

/// The result of a streaming call
pub struct StreamResponse {
    /// The parts, ending with exactly one `Finish`
    pub stream: PartStream,
    /// What was sent
    pub raw_call: RawCall,
    /// HTTP response metadata
    pub raw_response: RawResponse,
    /// Non-fatal warnings
    pub warnings: Vec<CallWarning>,
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("raw_call", &self.raw_call)
            .field("raw_response", &self.raw_response)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

/// Accumulates stream parts into a complete result
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    tool_calls: Vec<ToolCall>,
    finish_reason: Option<FinishReason>,
    usage: Option<Usage>,
    logprobs: Option<LogProbs>,
    errors: Vec<Error>,
}

impl StreamAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a stream part
    pub fn process_part(&mut self, part: StreamPart) {
        match part {
            StreamPart::TextDelta { text_delta } => self.text.push_str(&text_delta),
            StreamPart::ToolCallDelta { .. } => {}
            StreamPart::ToolCall(call) => self.tool_calls.push(call),
            StreamPart::Finish {
                finish_reason,
                usage,
                logprobs,
            } => {
                self.finish_reason = Some(finish_reason);
                self.usage = usage;
                self.logprobs = logprobs;
            }
            StreamPart::Error(error) => self.errors.push(error),
        }
    }

    /// Get the accumulated text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Completed tool calls, in arrival order
    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    /// The finish reason, once the stream has finished
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Usage from the finish part
    pub fn usage(&self) -> Option<Usage> {
        self.usage
    }

    /// Log-probabilities from the finish part
    pub fn logprobs(&self) -> Option<&LogProbs> {
        self.logprobs.as_ref()
    }

    /// Errors delivered inside the stream
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Whether a finish part has been seen
    pub fn is_finished(&self) -> bool {
        self.finish_reason.is_some()
    }
}
