//! Flattening of message prompts into a completion prompt

use onerouter_core::{AssistantContent, Error, InputFormat, Message, UserContent};

/// Label of user turns in the flattened prompt
const USER_LABEL: &str = "user";

/// Label of assistant turns in the flattened prompt
const ASSISTANT_LABEL: &str = "assistant";

/// A prompt ready for the completion endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    /// The prompt text
    pub prompt: String,
    /// Stop sequences that end the assistant turn
    pub stop_sequences: Vec<String>,
}

/// Convert a message prompt into completion prompt text
///
/// A bare prompt (one user message with one text part) is sent as is.
/// Anything else becomes a labelled transcript ending in an open
/// assistant turn, with a stop sequence at the next user label.
pub fn convert_to_completion_prompt(
    prompt: &[Message],
    input_format: InputFormat,
) -> Result<CompletionPrompt, Error> {
    if input_format == InputFormat::Prompt {
        if let [Message::User { content }] = prompt {
            if let [UserContent::Text(text)] = content.as_slice() {
                return Ok(CompletionPrompt {
                    prompt: text.clone(),
                    stop_sequences: Vec::new(),
                });
            }
        }
    }

    let mut text = String::new();
    let mut messages = prompt;

    if let Some((Message::System { content }, rest)) = prompt.split_first() {
        text.push_str(content);
        text.push_str("\n\n");
        messages = rest;
    }

    for message in messages {
        match message {
            Message::System { content } => {
                return Err(Error::InvalidPrompt(format!(
                    "Unexpected system message in prompt: {}",
                    content
                )));
            }
            Message::User { content } => {
                let user_message = content
                    .iter()
                    .map(|part| match part {
                        UserContent::Text(text) => Ok(text.as_str()),
                        UserContent::Image { .. } => Err(Error::unsupported("images")),
                    })
                    .collect::<Result<String, Error>>()?;

                text.push_str(&format!("{}:\n{}\n\n", USER_LABEL, user_message));
            }
            Message::Assistant { content } => {
                let assistant_message = content
                    .iter()
                    .map(|part| match part {
                        AssistantContent::Text(text) => Ok(text.as_str()),
                        AssistantContent::ToolCall { .. } => {
                            Err(Error::unsupported("tool-call messages"))
                        }
                    })
                    .collect::<Result<String, Error>>()?;

                text.push_str(&format!("{}:\n{}\n\n", ASSISTANT_LABEL, assistant_message));
            }
            Message::Tool { .. } => return Err(Error::unsupported("tool messages")),
        }
    }

    text.push_str(&format!("{}:\n", ASSISTANT_LABEL));

    Ok(CompletionPrompt {
        prompt: text,
        stop_sequences: vec![format!("\n{}:", USER_LABEL)],
    })
}
