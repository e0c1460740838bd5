//! Completion model settings

use crate::logprobs::Logprobs;
use std::collections::HashMap;

/// Model-specific settings of the completion endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionSettings {
    /// Echo back the prompt in addition to the completion
    pub echo: Option<bool>,
    /// Bias per token id, from -100 to 100
    pub logit_bias: Option<HashMap<String, f64>>,
    /// Return log-probabilities of the sampled tokens
    pub logprobs: Option<Logprobs>,
    /// Text that comes after the completion
    pub suffix: Option<String>,
    /// End-user identifier for abuse monitoring
    pub user: Option<String>,
}

impl CompletionSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo back the prompt
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Set the logit bias map
    pub fn with_logit_bias(mut self, bias: HashMap<String, f64>) -> Self {
        self.logit_bias = Some(bias);
        self
    }

    /// Request log-probabilities
    pub fn with_logprobs(mut self, logprobs: Logprobs) -> Self {
        self.logprobs = Some(logprobs);
        self
    }

    /// Set the suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the end-user identifier
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// The `logprobs` request value: a count, 0 for `true`, absent for `false`
    pub(crate) fn logprobs_value(&self) -> Option<u32> {
        match self.logprobs {
            Some(Logprobs::Top(n)) => Some(n),
            Some(Logprobs::Enabled(true)) => Some(0),
            Some(Logprobs::Enabled(false)) | None => None,
        }
    }
}
