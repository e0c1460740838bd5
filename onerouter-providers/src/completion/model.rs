//! Language model on the completion endpoint

use crate::api::{post_json_to_api, post_json_to_event_stream};
use crate::completion::converter::CompletionConverter;
use crate::completion::parser::{CompletionChunk, CompletionParser, CompletionResponse};
use crate::completion::settings::CompletionSettings;
use crate::completion::stream::CompletionChunkHandler;
use crate::config::{Compatibility, ModelConfig};
use crate::constants::COMPLETIONS_PATH;
use crate::stream::ProviderStream;
use crate::traits::{RequestConverter, ResponseParser};
use async_trait::async_trait;
use onerouter_core::{
    CallOptions, Error, GenerateResponse, LanguageModel, RawResponse, StreamResponse,
};
use serde_json::json;
use tracing::debug;

/// A model served by the text completion endpoint
///
/// Only plain text generation is supported: tools and object modes fail
/// before any request is sent.
///
/// # Example
///
/// ```no_run
/// use onerouter_core::{CallOptions, LanguageModel};
/// use onerouter_providers::{CompletionSettings, OneRouter};
///
/// # async fn run() -> onerouter_core::Result<()> {
/// let router = OneRouter::strict_default()?;
/// let model = router.completion("openai/gpt-3.5-turbo-instruct", CompletionSettings::default());
/// let response = model.do_generate(CallOptions::from_prompt("Say hi")).await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompletionModel {
    config: ModelConfig,
    converter: CompletionConverter,
    parser: CompletionParser,
}

impl CompletionModel {
    /// Create a completion model
    pub fn new(model_id: impl Into<String>, settings: CompletionSettings, config: ModelConfig) -> Self {
        let converter = CompletionConverter::new(model_id, settings, config.extra_body.clone());
        Self {
            config,
            converter,
            parser: CompletionParser,
        }
    }

    /// The model settings
    pub fn settings(&self) -> &CompletionSettings {
        &self.converter.settings
    }
}

#[async_trait]
impl LanguageModel for CompletionModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.converter.model_id
    }

    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResponse, Error> {
        let args = self.converter.convert_request(&options)?;
        let headers = self.config.request_headers(&options.headers)?;
        let url = self.config.url(COMPLETIONS_PATH);

        let response = post_json_to_api::<CompletionResponse>(
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
            total_tokens = parsed.usage.total_tokens(),
            "Completion finished"
        );

        Ok(GenerateResponse {
            text: parsed.text,
            tool_calls: parsed.tool_calls,
            finish_reason: parsed.finish_reason,
            usage: parsed.usage,
            logprobs: parsed.logprobs,
            raw_call: args.raw_call("prompt"),
            raw_response: RawResponse {
                headers: response.headers,
            },
            warnings: args.warnings,
        })
    }

    async fn do_stream(&self, options: CallOptions) -> Result<StreamResponse, Error> {
        let args = self.converter.convert_request(&options)?;
        let headers = self.config.request_headers(&options.headers)?;
        let url = self.config.url(COMPLETIONS_PATH);

        let mut body = args.clone();
        body.set("stream", Some(true))?;
        if self.config.compatibility == Compatibility::Strict {
            body.set("stream_options", Some(json!({"include_usage": true})))?;
        }

        let response = post_json_to_event_stream::<CompletionChunk>(
            self.config.client.as_ref(),
            &url,
            headers,
            &body.to_value(),
        )
        .await?;

        let stream = ProviderStream::new(response.value, CompletionChunkHandler::new(url));

        Ok(StreamResponse {
            stream: Box::pin(stream),
            raw_call: args.raw_call("prompt"),
            raw_response: RawResponse {
                headers: response.headers,
            },
            warnings: args.warnings,
        })
    }
}
