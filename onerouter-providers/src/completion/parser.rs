//! Response schemas and parsing for the completion endpoint

use crate::error::ErrorData;
use crate::finish_reason::map_finish_reason;
use crate::logprobs::{map_completion_logprobs, CompletionLogProbs};
use crate::schema::UsageInfo;
use crate::traits::{ParsedResponse, ResponseParser};
use onerouter_core::Error;
use serde::Deserialize;

/// Buffered completion response
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Generated choices; only the first is used
    pub choices: Vec<CompletionChoice>,
    /// Token usage
    pub usage: UsageInfo,
}

/// One choice of a buffered completion response
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Generated text
    pub text: String,
    /// Upstream finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Log-probabilities when requested
    #[serde(default)]
    pub logprobs: Option<CompletionLogProbs>,
}

/// One streamed event: a data chunk or an in-band error envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CompletionChunk {
    /// Regular data chunk
    Data(CompletionChunkData),
    /// Error reported mid-stream
    Error(ErrorData),
}

/// Data chunk of a streamed completion
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChunkData {
    /// Choice deltas; empty on the trailing usage chunk
    pub choices: Vec<CompletionChunkChoice>,
    /// Usage, usually on the last chunk only
    #[serde(default)]
    pub usage: Option<UsageInfo>,
}

/// Choice delta of a streamed completion
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChunkChoice {
    /// Text delta
    pub text: String,
    /// Set on the final delta
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Choice index
    pub index: u32,
    /// Log-probabilities of this delta
    #[serde(default)]
    pub logprobs: Option<CompletionLogProbs>,
}

/// Parses buffered completion responses
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionParser;

impl ResponseParser for CompletionParser {
    type Wire = CompletionResponse;

    fn parse_response(&self, response: CompletionResponse) -> Result<ParsedResponse, Error> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::ResponseError {
                message: "No choice in completion response".to_string(),
            })?;

        Ok(ParsedResponse {
            finish_reason: map_finish_reason(choice.finish_reason.as_deref()),
            logprobs: map_completion_logprobs(choice.logprobs.as_ref()),
            text: Some(choice.text),
            tool_calls: Vec::new(),
            usage: response.usage.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onerouter_core::{FinishReason, LogProb, TopLogProb, Usage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_response() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "object": "text_completion",
            "created": 1711115037,
            "model": "openai/gpt-3.5-turbo-instruct",
            "choices": [{"text": "Hello, World!", "index": 0, "logprobs": null, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 4, "completion_tokens": 30, "total_tokens": 34}
        }))
        .unwrap();

        let parsed = CompletionParser.parse_response(response).unwrap();

        assert_eq!(parsed.text.as_deref(), Some("Hello, World!"));
        assert_eq!(parsed.finish_reason, FinishReason::Stop);
        assert_eq!(
            parsed.usage,
            Usage {
                prompt_tokens: 4,
                completion_tokens: 30
            }
        );
        assert!(parsed.tool_calls.is_empty());
        assert_eq!(parsed.logprobs, None);
    }

    #[test]
    fn test_parse_response_with_logprobs() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "text": "Hi",
                "finish_reason": "length",
                "logprobs": {
                    "tokens": ["Hi"],
                    "token_logprobs": [-0.5],
                    "top_logprobs": [{"Hi": -0.5}]
                }
            }],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1}
        }))
        .unwrap();

        let parsed = CompletionParser.parse_response(response).unwrap();

        assert_eq!(parsed.finish_reason, FinishReason::Length);
        let logprobs = parsed.logprobs.unwrap();
        assert_eq!(
            logprobs[0],
            LogProb {
                token: "Hi".into(),
                logprob: -0.5,
                top_logprobs: vec![TopLogProb {
                    token: "Hi".into(),
                    logprob: -0.5
                }]
            }
        );
    }

    #[test]
    fn test_no_choice_is_a_response_error() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [],
            "usage": {"prompt_tokens": 1, "completion_tokens": 0}
        }))
        .unwrap();

        match CompletionParser.parse_response(response) {
            Err(Error::ResponseError { message }) => {
                assert_eq!(message, "No choice in completion response")
            }
            other => panic!("Expected ResponseError, got {:?}", other),
        }
    }

    #[test]
    fn test_chunk_variants() {
        let data: CompletionChunk =
            serde_json::from_str(r#"{"choices":[{"text":"Hel","index":0}]}"#).unwrap();
        assert!(matches!(data, CompletionChunk::Data(d) if d.choices[0].text == "Hel"));

        let usage: CompletionChunk = serde_json::from_str(
            r#"{"choices":[],"usage":{"prompt_tokens":3,"completion_tokens":5}}"#,
        )
        .unwrap();
        assert!(matches!(usage, CompletionChunk::Data(d) if d.usage.is_some()));

        let error: CompletionChunk = serde_json::from_str(
            r#"{"error":{"message":"overloaded","type":"server_error","param":null,"code":null}}"#,
        )
        .unwrap();
        assert!(matches!(error, CompletionChunk::Error(e) if e.error.message == "overloaded"));
    }
}
