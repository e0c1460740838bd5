//! Chat model settings

use crate::logprobs::Logprobs;
use std::collections::HashMap;

/// Model-specific settings of the chat endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSettings {
    /// Bias per token id, from -100 to 100
    pub logit_bias: Option<HashMap<String, f64>>,
    /// Return log-probabilities of the sampled tokens
    pub logprobs: Option<Logprobs>,
    /// Allow the model to request several tool calls at once
    pub parallel_tool_calls: Option<bool>,
    /// End-user identifier for abuse monitoring
    pub user: Option<String>,
}

impl ChatSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
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

    /// Allow or forbid parallel tool calls
    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = Some(parallel);
        self
    }

    /// Set the end-user identifier
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub(crate) fn logprobs_enabled(&self) -> Option<bool> {
        match self.logprobs {
            Some(Logprobs::Enabled(true) | Logprobs::Top(_)) => Some(true),
            _ => None,
        }
    }

    pub(crate) fn top_logprobs(&self) -> Option<u32> {
        match self.logprobs {
            Some(Logprobs::Top(n)) => Some(n),
            Some(Logprobs::Enabled(true)) => Some(0),
            _ => None,
        }
    }
}
