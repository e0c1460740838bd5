//! The OneRouter provider factory

use crate::builder::OneRouterBuilder;
use crate::chat::{ChatModel, ChatSettings};
use crate::completion::{CompletionModel, CompletionSettings};
use crate::config::{Compatibility, ModelConfig};
use crate::constants::{CHAT_PROVIDER, COMPLETION_PROVIDER, DEFAULT_BASE_URL, INSTRUCT_MODEL_ID};
use crate::http::{HttpClient, ReqwestClient};
use crate::utils::without_trailing_slash;
use onerouter_core::{Error, LanguageModel};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Settings of a provider instance
#[derive(Clone, Default)]
pub struct OneRouterSettings {
    /// Base URL of the API; defaults to `https://1router.com/api/v1`
    pub base_url: Option<String>,
    /// API key; `ONEROUTER_API_KEY` is read at request time when absent
    pub api_key: Option<String>,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    /// Compatibility mode
    pub compatibility: Compatibility,
    /// Custom HTTP transport
    pub client: Option<Arc<dyn HttpClient>>,
    /// Fields merged into every request body
    pub extra_body: Map<String, Value>,
}

impl fmt::Debug for OneRouterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneRouterSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("compatibility", &self.compatibility)
            .field("client", &self.client.as_ref().map(|_| "<custom>"))
            .field("extra_body", &self.extra_body)
            .finish()
    }
}

/// Factory for OneRouter models
///
/// Models created from the same instance share its configuration and
/// HTTP transport.
///
/// # Example
///
/// ```no_run
/// use onerouter_core::LanguageModel;
/// use onerouter_providers::{ChatSettings, OneRouter};
///
/// # fn run() -> onerouter_core::Result<()> {
/// let router = OneRouter::builder()
///     .api_key("sk-or-...")
///     .header("X-Title", "my-app")
///     .build()?;
///
/// let chat = router.chat("anthropic/claude-3.5-sonnet", ChatSettings::default());
/// let model = router.language_model("openai/gpt-3.5-turbo-instruct");
/// assert_eq!(model.provider(), "onerouter.completion");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OneRouter {
    base_url: String,
    api_key: Option<String>,
    headers: HashMap<String, String>,
    compatibility: Compatibility,
    client: Arc<dyn HttpClient>,
    extra_body: Map<String, Value>,
}

impl OneRouter {
    /// Create a provider from settings
    pub fn new(settings: OneRouterSettings) -> Result<Self, Error> {
        let client = match settings.client {
            Some(client) => client,
            None => Arc::new(ReqwestClient::new()?),
        };

        let base_url = settings
            .base_url
            .as_deref()
            .map(without_trailing_slash)
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();

        Ok(Self {
            base_url,
            api_key: settings.api_key,
            headers: settings.headers,
            compatibility: settings.compatibility,
            client,
            extra_body: settings.extra_body,
        })
    }

    /// Start a builder
    pub fn builder() -> OneRouterBuilder {
        OneRouterBuilder::new()
    }

    /// The default instance: default settings with strict compatibility
    pub fn strict_default() -> Result<Self, Error> {
        Self::new(OneRouterSettings {
            compatibility: Compatibility::Strict,
            ..OneRouterSettings::default()
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Compatibility mode
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    /// A chat model
    pub fn chat(&self, model_id: impl Into<String>, settings: ChatSettings) -> ChatModel {
        ChatModel::new(model_id, settings, self.model_config(CHAT_PROVIDER))
    }

    /// A text completion model
    pub fn completion(&self, model_id: impl Into<String>, settings: CompletionSettings) -> CompletionModel {
        CompletionModel::new(model_id, settings, self.model_config(COMPLETION_PROVIDER))
    }

    /// A model with default settings on the endpoint that serves it
    ///
    /// The instruct model is only available on the completion endpoint;
    /// everything else goes to chat.
    pub fn language_model(&self, model_id: &str) -> Box<dyn LanguageModel> {
        if model_id == INSTRUCT_MODEL_ID {
            Box::new(self.completion(model_id, CompletionSettings::default()))
        } else {
            Box::new(self.chat(model_id, ChatSettings::default()))
        }
    }

    fn model_config(&self, provider: &str) -> ModelConfig {
        ModelConfig {
            provider: provider.to_string(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            headers: self.headers.clone(),
            compatibility: self.compatibility,
            client: Arc::clone(&self.client),
            extra_body: self.extra_body.clone(),
        }
    }
}

impl fmt::Debug for OneRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneRouter")
            .field("base_url", &self.base_url)
            .field("compatibility", &self.compatibility)
            .finish_non_exhaustive()
    }
}
