//! Language model on the chat endpoint
//!
//! Supports tool calling, JSON object output and forced-tool object output
//! on top of regular text generation.

use crate::api::{post_json_to_api, post_json_to_event_stream};
use crate::chat::converter::ChatConverter;
use crate::chat::parser::{ChatChunk, ChatParser, ChatResponse};
use crate::chat::settings::ChatSettings;
use crate::chat::stream::ChatChunkHandler;
use crate::config::{Compatibility, ModelConfig};
use crate::constants::CHAT_COMPLETIONS_PATH;
use crate::stream::ProviderStream;
use crate::traits::{RequestConverter, ResponseParser};
use async_trait::async_trait;
use onerouter_core::{
    CallOptions, Error, GenerateResponse, LanguageModel, ObjectGenerationMode, RawResponse,
    StreamResponse,
};
use serde_json::json;
use tracing::debug;

/// A model served by the chat completions endpoint
///
/// # Example
///
/// ```no_run
/// use onerouter_core::{CallOptions, LanguageModel, Message};
/// use onerouter_providers::{ChatSettings, OneRouter};
///
/// # async fn run() -> onerouter_core::Result<()> {
/// let router = OneRouter::strict_default()?;
/// let model = router.chat("anthropic/claude-3.5-sonnet", ChatSettings::default());
/// let options = CallOptions::from_messages(vec![
///     Message::system("You are terse."),
///     Message::user("What is Rust?"),
/// ]);
/// let response = model.do_generate(options).await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatModel {
    config: ModelConfig,
    converter: ChatConverter,
    parser: ChatParser,
}

impl ChatModel {
    /// Create a chat model
    pub fn new(model_id: impl Into<String>, settings: ChatSettings, config: ModelConfig) -> Self {
        let converter = ChatConverter::new(model_id, settings, config.extra_body.clone());
        Self {
            config,
            converter,
            parser: ChatParser,
        }
    }

    /// The model settings
    pub fn settings(&self) -> &ChatSettings {
        &self.converter.settings
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.converter.model_id
    }

    fn default_object_generation_mode(&self) -> Option<ObjectGenerationMode> {
        Some(ObjectGenerationMode::Tool)
    }

    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResponse, Error> {
        let args = self.converter.convert_request(&options)?;
        let headers = self.config.request_headers(&options.headers)?;
        let url = self.config.url(CHAT_COMPLETIONS_PATH);

        let response = post_json_to_api::<ChatResponse>(
            self.config.client.as_ref(),
            &url,
            headers,
            &args.to_value(),
        )
        .await?;
        let parsed = self.parser.parse_response(response.value)?;

        debug!(
            model = %self.converter.model_id,
            finish_reason = %parsed.finish_reason,
            tool_calls = parsed.tool_calls.len(),
            total_tokens = parsed.usage.total_tokens(),
            "Chat completion finished"
        );

        Ok(GenerateResponse {
            text: parsed.text,
            tool_calls: parsed.tool_calls,
            finish_reason: parsed.finish_reason,
            usage: parsed.usage,
            logprobs: parsed.logprobs,
            raw_call: args.raw_call("messages"),
            raw_response: RawResponse {
                headers: response.headers,
            },
            warnings: args.warnings,
        })
    }

    async fn do_stream(&self, options: CallOptions) -> Result<StreamResponse, Error> {
        let args = self.converter.convert_request(&options)?;
        let headers = self.config.request_headers(&options.headers)?;
        let url = self.config.url(CHAT_COMPLETIONS_PATH);

        let mut body = args.clone();
        body.set("stream", Some(true))?;
        if self.config.compatibility == Compatibility::Strict {
            body.set("stream_options", Some(json!({"include_usage": true})))?;
        }

        let response = post_json_to_event_stream::<ChatChunk>(
            self.config.client.as_ref(),
            &url,
            headers,
            &body.to_value(),
        )
        .await?;

        let stream = ProviderStream::new(response.value, ChatChunkHandler::new(url));

        Ok(StreamResponse {
            stream: Box::pin(stream),
            raw_call: args.raw_call("messages"),
            raw_response: RawResponse {
                headers: response.headers,
            },
            warnings: args.warnings,
        })
    }
}
