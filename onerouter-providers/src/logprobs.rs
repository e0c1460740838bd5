//! Log-probability settings and mapping

use onerouter_core::{LogProb, LogProbs, TopLogProb};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Whether and how many log-probabilities to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logprobs {
    /// `true` requests log-probabilities of the sampled tokens only
    Enabled(bool),
    /// Also return this many most likely alternatives per position
    Top(u32),
}

/// Log-probabilities in the completion endpoint's shape
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionLogProbs {
    /// Sampled tokens
    pub tokens: Vec<String>,
    /// Log-probability of each sampled token
    pub token_logprobs: Vec<Option<f64>>,
    /// Alternatives per position
    #[serde(default)]
    pub top_logprobs: Option<Vec<Option<HashMap<String, f64>>>>,
}

/// Log-probabilities in the chat endpoint's shape
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatLogProbs {
    /// One entry per sampled token
    #[serde(default)]
    pub content: Option<Vec<ChatLogProbEntry>>,
}

/// One sampled token in [`ChatLogProbs`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatLogProbEntry {
    /// The token
    pub token: String,
    /// Its log-probability
    pub logprob: f64,
    /// Most likely alternatives
    #[serde(default)]
    pub top_logprobs: Option<Vec<ChatTopLogProb>>,
}

/// One alternative in [`ChatLogProbEntry`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatTopLogProb {
    /// The token
    pub token: String,
    /// Its log-probability
    pub logprob: f64,
}

/// Map completion log-probabilities, one entry per token
///
/// A missing token log-probability maps to 0. Alternatives come from an
/// unordered JSON object, so they are ordered most likely first.
pub fn map_completion_logprobs(logprobs: Option<&CompletionLogProbs>) -> Option<LogProbs> {
    let logprobs = logprobs?;

    Some(
        logprobs
            .tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                let top = logprobs
                    .top_logprobs
                    .as_ref()
                    .and_then(|positions| positions.get(index))
                    .and_then(Option::as_ref)
                    .map(|alternatives| {
                        let mut top: Vec<TopLogProb> = alternatives
                            .iter()
                            .map(|(token, logprob)| TopLogProb {
                                token: token.clone(),
                                logprob: *logprob,
                            })
                            .collect();
                        top.sort_by(|a, b| {
                            b.logprob
                                .partial_cmp(&a.logprob)
                                .unwrap_or(Ordering::Equal)
                                .then_with(|| a.token.cmp(&b.token))
                        });
                        top
                    })
                    .unwrap_or_default();

                LogProb {
                    token: token.clone(),
                    logprob: logprobs
                        .token_logprobs
                        .get(index)
                        .copied()
                        .flatten()
                        .unwrap_or(0.0),
                    top_logprobs: top,
                }
            })
            .collect(),
    )
}

/// Map chat log-probabilities, one entry per content token
pub fn map_chat_logprobs(logprobs: Option<&ChatLogProbs>) -> Option<LogProbs> {
    let content = logprobs?.content.as_ref()?;

    Some(
        content
            .iter()
            .map(|entry| LogProb {
                token: entry.token.clone(),
                logprob: entry.logprob,
                top_logprobs: entry
                    .top_logprobs
                    .iter()
                    .flatten()
                    .map(|top| TopLogProb {
                        token: top.token.clone(),
                        logprob: top.logprob,
                    })
                    .collect(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_completion_logprobs_one_entry_per_token() {
        let raw: CompletionLogProbs = serde_json::from_str(
            r#"{
                "tokens": ["Hello", ",", " world"],
                "token_logprobs": [-0.1, -0.5, null],
                "top_logprobs": [
                    {"Hello": -0.1, "Hi": -2.3},
                    {",": -0.5},
                    null
                ]
            }"#,
        )
        .unwrap();

        let mapped = map_completion_logprobs(Some(&raw)).unwrap();

        assert_eq!(mapped.len(), 3);
        assert_eq!(
            mapped[0],
            LogProb {
                token: "Hello".into(),
                logprob: -0.1,
                top_logprobs: vec![
                    TopLogProb {
                        token: "Hello".into(),
                        logprob: -0.1
                    },
                    TopLogProb {
                        token: "Hi".into(),
                        logprob: -2.3
                    },
                ],
            }
        );
        assert_eq!(mapped[1].top_logprobs.len(), 1);
        assert_eq!(mapped[2].logprob, 0.0);
        assert!(mapped[2].top_logprobs.is_empty());
    }

    #[test]
    fn test_completion_logprobs_without_alternatives() {
        let raw: CompletionLogProbs = serde_json::from_str(
            r#"{"tokens": ["a", "b"], "token_logprobs": [-1.0, -2.0], "top_logprobs": null}"#,
        )
        .unwrap();

        let mapped = map_completion_logprobs(Some(&raw)).unwrap();
        assert_eq!(mapped.len(), 2);
        assert!(mapped.iter().all(|lp| lp.top_logprobs.is_empty()));
        assert_eq!(mapped[1].logprob, -2.0);
    }

    #[test]
    fn test_missing_logprobs_map_to_none() {
        assert_eq!(map_completion_logprobs(None), None);
        assert_eq!(map_chat_logprobs(None), None);
        assert_eq!(map_chat_logprobs(Some(&ChatLogProbs { content: None })), None);
    }

    #[test]
    fn test_chat_logprobs() {
        let raw: ChatLogProbs = serde_json::from_str(
            r#"{"content": [
                {"token": "Hi", "logprob": -0.2, "top_logprobs": [
                    {"token": "Hi", "logprob": -0.2},
                    {"token": "Hello", "logprob": -1.7}
                ]},
                {"token": "!", "logprob": -0.9, "top_logprobs": []}
            ]}"#,
        )
        .unwrap();

        let mapped = map_chat_logprobs(Some(&raw)).unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].top_logprobs.len(), 2);
        assert_eq!(mapped[0].top_logprobs[1].token, "Hello");
        assert!(mapped[1].top_logprobs.is_empty());
    }
}
