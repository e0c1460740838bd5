//! Wire structures shared by the completion and chat schemas

use onerouter_core::Usage;
use serde::Deserialize;

/// Token usage block of a response or stream chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UsageInfo {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
}

impl From<UsageInfo> for Usage {
    fn from(usage: UsageInfo) -> Self {
        Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        }
    }
}
