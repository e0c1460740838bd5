//! Common utilities for the models

use onerouter_core::Error;

/// Resolve an API key from an explicit value or an environment variable
pub fn load_api_key(
    api_key: Option<&str>,
    environment_variable_name: &str,
    description: &str,
) -> Result<String, Error> {
    if let Some(key) = api_key {
        return Ok(key.to_string());
    }

    match std::env::var(environment_variable_name) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(Error::Authentication(format!(
            "{} API key is missing. Pass it using the 'api_key' setting or the {} environment variable.",
            description, environment_variable_name
        ))),
    }
}

/// Strip a single trailing slash from a URL
pub fn without_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Whether the text is a complete JSON document
pub fn is_parsable_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Generate an ID for a tool call the upstream did not name
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
