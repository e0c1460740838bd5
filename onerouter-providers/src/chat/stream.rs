//! Streaming for the chat endpoint

use crate::api::EventStream;
use crate::chat::parser::{ChatChunk, ChatToolCallDelta};
use crate::error::stream_error;
use crate::finish_reason::map_finish_reason;
use crate::logprobs::map_chat_logprobs;
use crate::stream::{ChunkHandler, ProviderStream};
use crate::utils::is_parsable_json;
use onerouter_core::{Error, FinishReason, LogProbs, StreamPart, ToolCall, Usage};
use std::collections::{HashMap, VecDeque};
use tracing::{trace, warn};

/// Stream of chat parts
pub type ChatStream = ProviderStream<EventStream<ChatChunk>, ChatChunkHandler>;

/// A tool call being assembled from fragments
#[derive(Debug)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
    emitted: bool,
}

impl PendingToolCall {
    /// Emit the complete call once its arguments form valid JSON
    fn complete(&mut self, parts: &mut VecDeque<StreamPart>) {
        if self.emitted || !is_parsable_json(&self.arguments) {
            return;
        }
        self.emitted = true;
        trace!(tool_call_id = %self.id, tool_name = %self.name, "Tool call complete");
        parts.push_back(StreamPart::ToolCall(ToolCall::function(
            self.id.clone(),
            self.name.clone(),
            self.arguments.clone(),
        )));
    }

    fn delta(&self, args_text_delta: String) -> StreamPart {
        StreamPart::ToolCallDelta {
            tool_call_type: "function".to_string(),
            tool_call_id: self.id.clone(),
            tool_name: self.name.clone(),
            args_text_delta,
        }
    }
}

/// Running state of one chat stream
#[derive(Debug)]
pub struct ChatChunkHandler {
    url: String,
    finish_reason: FinishReason,
    usage: Option<Usage>,
    logprobs: Option<LogProbs>,
    tool_calls: HashMap<usize, PendingToolCall>,
}

impl ChatChunkHandler {
    /// Create a handler for a stream from `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            finish_reason: FinishReason::Unknown,
            usage: None,
            logprobs: None,
            tool_calls: HashMap::new(),
        }
    }

    fn handle_tool_call_delta(
        &mut self,
        delta: ChatToolCallDelta,
        parts: &mut VecDeque<StreamPart>,
    ) -> Result<(), Error> {
        let function = delta.function.unwrap_or_default();

        if let Some(call) = self.tool_calls.get_mut(&delta.index) {
            let arguments = function.arguments.unwrap_or_default();
            call.arguments.push_str(&arguments);
            parts.push_back(call.delta(arguments));
            call.complete(parts);
            return Ok(());
        }

        if delta.call_type.as_deref() != Some("function") {
            return Err(Error::InvalidResponseData("Expected 'function' type.".to_string()));
        }
        let id = delta
            .id
            .ok_or_else(|| Error::InvalidResponseData("Expected 'id' to be a string.".to_string()))?;
        let name = function.name.ok_or_else(|| {
            Error::InvalidResponseData("Expected 'function.name' to be a string.".to_string())
        })?;

        let mut call = PendingToolCall {
            id,
            name,
            arguments: function.arguments.unwrap_or_default(),
            emitted: false,
        };

        // some upstreams send the whole call in one fragment
        if !call.arguments.is_empty() {
            parts.push_back(call.delta(call.arguments.clone()));
            call.complete(parts);
        }

        self.tool_calls.insert(delta.index, call);
        Ok(())
    }
}

impl ChunkHandler for ChatChunkHandler {
    type Chunk = ChatChunk;

    fn handle_chunk(&mut self, chunk: Result<ChatChunk, Error>, parts: &mut VecDeque<StreamPart>) {
        let data = match chunk {
            Ok(ChatChunk::Data(data)) => data,
            Ok(ChatChunk::Error(data)) => {
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

        if let Some(mapped) = map_chat_logprobs(choice.logprobs.as_ref()) {
            if !mapped.is_empty() {
                self.logprobs.get_or_insert_with(Vec::new).extend(mapped);
            }
        }

        let Some(delta) = choice.delta else {
            return;
        };

        if let Some(text_delta) = delta.content {
            parts.push_back(StreamPart::TextDelta { text_delta });
        }

        for tool_call in delta.tool_calls.unwrap_or_default() {
            if let Err(error) = self.handle_tool_call_delta(tool_call, parts) {
                warn!(url = %self.url, error = %error, "Malformed tool call fragment");
                parts.push_back(StreamPart::Error(error));
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

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    fn chunk(json: &str) -> Result<ChatChunk, Error> {
        Ok(serde_json::from_str(json).unwrap())
    }

    async fn collect(chunks: Vec<Result<ChatChunk, Error>>) -> Vec<StreamPart> {
        let inner: EventStream<ChatChunk> = Box::pin(futures::stream::iter(chunks));
        ProviderStream::new(inner, ChatChunkHandler::new("http://x/chat/completions"))
            .collect()
            .await
    }

    fn tool_calls(parts: &[StreamPart]) -> Vec<&ToolCall> {
        parts
            .iter()
            .filter_map(|part| match part {
                StreamPart::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_text_stream() {
        let parts = collect(vec![
            chunk(r#"{"choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}"#),
            chunk(r#"{"choices":[{"index":0,"delta":{"content":"Hello"}}]}"#),
            chunk(r#"{"choices":[{"index":0,"delta":{"content":" world"},"finish_reason":"stop"}]}"#),
            chunk(r#"{"choices":[],"usage":{"prompt_tokens":4,"completion_tokens":2}}"#),
        ])
        .await;

        let text: String = parts
            .iter()
            .filter_map(|part| match part {
                StreamPart::TextDelta { text_delta } => Some(text_delta.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "Hello world");

        match parts.last() {
            Some(StreamPart::Finish {
                finish_reason,
                usage,
                ..
            }) => {
                assert_eq!(*finish_reason, FinishReason::Stop);
                assert_eq!(usage.map(|u| u.total_tokens()), Some(6));
            }
            other => panic!("Expected finish, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stream_without_finish_reason_finishes_unknown() {
        let parts = collect(vec![]).await;
        assert_eq!(parts.len(), 1);
        assert!(matches!(
            &parts[0],
            StreamPart::Finish {
                finish_reason: FinishReason::Unknown,
                usage: None,
                logprobs: None,
            }
        ));

        let parts = collect(vec![chunk(
            r#"{"choices":[{"index":0,"delta":{"content":"partial"}}]}"#,
        )])
        .await;
        assert!(matches!(
            parts.last(),
            Some(StreamPart::Finish {
                finish_reason: FinishReason::Unknown,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_tool_call_assembled_from_fragments() {
        let parts = collect(vec![
            chunk(
                r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"weather","arguments":""}}]}}]}"#,
            ),
            chunk(r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"city\":"}}]}}]}"#),
            chunk(r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"function":{"arguments":"\"Paris\"}"}}]}}]}"#),
            chunk(r#"{"choices":[{"index":0,"delta":{},"finish_reason":"tool_calls"}]}"#),
        ])
        .await;

        let deltas: Vec<&str> = parts
            .iter()
            .filter_map(|part| match part {
                StreamPart::ToolCallDelta {
                    tool_call_id,
                    args_text_delta,
                    ..
                } => {
                    assert_eq!(tool_call_id, "call_1");
                    Some(args_text_delta.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(deltas, vec!["{\"city\":", "\"Paris\"}"]);

        assert_eq!(
            tool_calls(&parts),
            vec![&ToolCall::function("call_1", "weather", "{\"city\":\"Paris\"}")]
        );
        assert!(matches!(
            parts.last(),
            Some(StreamPart::Finish {
                finish_reason: FinishReason::ToolCalls,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_tool_call_in_single_fragment() {
        let parts = collect(vec![chunk(
            r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"id":"call_9","type":"function","function":{"name":"time","arguments":"{}"}}]}}]}"#,
        )])
        .await;

        assert!(matches!(
            &parts[0],
            StreamPart::ToolCallDelta { args_text_delta, .. } if args_text_delta == "{}"
        ));
        assert_eq!(tool_calls(&parts), vec![&ToolCall::function("call_9", "time", "{}")]);
    }

    #[tokio::test]
    async fn test_complete_tool_call_is_emitted_once() {
        let parts = collect(vec![
            chunk(
                r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"time","arguments":"{}"}}]}}]}"#,
            ),
            chunk(r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"function":{"arguments":""}}]}}]}"#),
        ])
        .await;

        assert_eq!(tool_calls(&parts).len(), 1);
    }

    #[tokio::test]
    async fn test_parallel_tool_calls_by_index() {
        let parts = collect(vec![
            chunk(
                r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"id":"a","type":"function","function":{"name":"one","arguments":"{\"x\":"}},{"index":1,"id":"b","type":"function","function":{"name":"two","arguments":""}}]}}]}"#,
            ),
            chunk(
                r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":1,"function":{"arguments":"{}"}},{"index":0,"function":{"arguments":"1}"}}]}}]}"#,
            ),
        ])
        .await;

        assert_eq!(
            tool_calls(&parts),
            vec![
                &ToolCall::function("b", "two", "{}"),
                &ToolCall::function("a", "one", "{\"x\":1}"),
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_first_fragment_is_reported() {
        let parts = collect(vec![chunk(
            r#"{"choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"type":"function","function":{"name":"time"}}]}}]}"#,
        )])
        .await;

        match &parts[0] {
            StreamPart::Error(Error::InvalidResponseData(message)) => {
                assert_eq!(message, "Expected 'id' to be a string.")
            }
            other => panic!("Expected invalid response data, got {:?}", other),
        }
        assert!(matches!(parts.last(), Some(StreamPart::Finish { .. })));
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let parts = collect(vec![chunk(
            r#"{"error":{"message":"Provider returned error","code":502}}"#,
        )])
        .await;

        assert!(matches!(&parts[0], StreamPart::Error(Error::Api { .. })));
        assert!(matches!(
            &parts[1],
            StreamPart::Finish {
                finish_reason: FinishReason::Error,
                ..
            }
        ));
    }
}
