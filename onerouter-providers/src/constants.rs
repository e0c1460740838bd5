//! Constants for the OneRouter models

/// Default OneRouter base URL
pub const DEFAULT_BASE_URL: &str = "https://1router.com/api/v1";

/// Environment variable holding the API key
pub const API_KEY_ENV_VAR: &str = "ONEROUTER_API_KEY";

/// Name used in API key error messages
pub const PROVIDER_DESCRIPTION: &str = "OneRouter";

/// Provider id of the chat model
pub const CHAT_PROVIDER: &str = "onerouter.chat";

/// Provider id of the completion model
pub const COMPLETION_PROVIDER: &str = "onerouter.completion";

/// Path of the completion endpoint
pub const COMPLETIONS_PATH: &str = "/completions";

/// Path of the chat endpoint
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// The one model id routed to the completion endpoint by `language_model`
pub const INSTRUCT_MODEL_ID: &str = "openai/gpt-3.5-turbo-instruct";
