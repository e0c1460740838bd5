//! Streaming for the completion endpoint

use crate::api::EventStream;
use crate::completion::parser::CompletionChunk;
use crate::error::stream_error;
use crate::finish_reason::map_finish_reason;
use crate::logprobs::map_completion_logprobs;
use crate::stream::{ChunkHandler, ProviderStream};
use onerouter_core::{Error, FinishReason, LogProbs, StreamPart, Usage};
use std::collections::VecDeque;
use tracing::warn;

/// Stream of completion parts
pub type CompletionStream = ProviderStream<EventStream<CompletionChunk>, CompletionChunkHandler>;

/// Running state of one completion stream
#[derive(Debug)]
pub struct CompletionChunkHandler {
    url: String,
    finish_reason: FinishReason,
    usage: Option<Usage>,
    logprobs: Option<LogProbs>,
}

impl CompletionChunkHandler {
    /// Create a handler for a stream from `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            finish_reason: FinishReason::Other,
            usage: None,
            logprobs: None,
        }
    }
}

impl ChunkHandler for CompletionChunkHandler {
    type Chunk = CompletionChunk;

    fn handle_chunk(&mut self, chunk: Result<CompletionChunk, Error>, parts: &mut VecDeque<StreamPart>) {
        let data = match chunk {
            Ok(CompletionChunk::Data(data)) => data,
            Ok(CompletionChunk::Error(data)) => {
                warn!(url = %self.url, message = %data.error.message, "Upstream reported a stream error");
                self.finish_reason = FinishReason::Error;
                parts.push_back(StreamPart::Error(stream_error(&self.url, data)));
                return;
            }
            Err(error) => {
                warn!(url = %self.url, error = %error, "Failed to parse stream chunk");
                self.finish_reason = FinishReason::Error;
                parts.push_back(StreamPart::Error(error));
                return;
            }
        };

        if let Some(usage) = data.usage {
            self.usage = Some(usage.into());
        }

        let Some(choice) = data.choices.into_iter().next() else {
            return;
        };

        if let Some(reason) = choice.finish_reason.as_deref() {
            self.finish_reason = map_finish_reason(Some(reason));
        }

        parts.push_back(StreamPart::TextDelta {
            text_delta: choice.text,
        });

        if let Some(mapped) = map_completion_logprobs(choice.logprobs.as_ref()) {
            if !mapped.is_empty() {
                self.logprobs.get_or_insert_with(Vec::new).extend(mapped);
            }
        }
    }

    fn finish(&mut self, parts: &mut VecDeque<StreamPart>) {
        parts.push_back(StreamPart::Finish {
            finish_reason: self.finish_reason,
            usage: self.usage,
            logprobs: self.logprobs.take(),
        });
    }
}
