//! Conversion of prompts to chat messages

use onerouter_core::{AssistantContent, ImageData, Message, UserContent};
use serde_json::{json, Value};

/// MIME type assumed for base64 images without one
const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Convert a prompt into the chat endpoint's `messages` array
pub fn convert_to_chat_messages(prompt: &[Message]) -> Vec<Value> {
    let mut messages = Vec::with_capacity(prompt.len());

    for message in prompt {
        match message {
            Message::System { content } => {
                messages.push(json!({"role": "system", "content": content}));
            }
            Message::User { content } => {
                if let [UserContent::Text(text)] = content.as_slice() {
                    messages.push(json!({"role": "user", "content": text}));
                    continue;
                }

                let parts: Vec<Value> = content.iter().map(convert_user_part).collect();
                messages.push(json!({"role": "user", "content": parts}));
            }
            Message::Assistant { content } => {
                let mut text = String::new();
                let mut tool_calls = Vec::new();

                for part in content {
                    match part {
                        AssistantContent::Text(part) => text.push_str(part),
                        AssistantContent::ToolCall {
                            tool_call_id,
                            tool_name,
                            args,
                        } => tool_calls.push(json!({
                            "id": tool_call_id,
                            "type": "function",
                            "function": {
                                "name": tool_name,
                                "arguments": args.to_string(),
                            }
                        })),
                    }
                }

                let mut assistant = json!({"role": "assistant", "content": text});
                if !tool_calls.is_empty() {
                    assistant["tool_calls"] = Value::Array(tool_calls);
                }
                messages.push(assistant);
            }
            Message::Tool { content } => {
                for result in content {
                    messages.push(json!({
                        "role": "tool",
                        "tool_call_id": result.tool_call_id,
                        "content": result.result.to_string(),
                    }));
                }
            }
        }
    }

    messages
}

fn convert_user_part(part: &UserContent) -> Value {
    match part {
        UserContent::Text(text) => json!({"type": "text", "text": text}),
        UserContent::Image { data, mime_type } => {
            let url = match data {
                ImageData::Url(url) => url.clone(),
                ImageData::Base64(data) => format!(
                    "data:{};base64,{}",
                    mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME_TYPE),
                    data
                ),
            };
            json!({"type": "image_url", "image_url": {"url": url}})
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_system_and_single_text_user() {
        let messages =
            convert_to_chat_messages(&[Message::system("Be brief."), Message::user("Hello")]);

        assert_eq!(
            messages,
            vec![
                json!({"role": "system", "content": "Be brief."}),
                json!({"role": "user", "content": "Hello"}),
            ]
        );
    }

    #[test]
    fn test_multi_part_user_message() {
        let messages = convert_to_chat_messages(&[Message::User {
            content: vec![
                UserContent::Text("What is this?".into()),
                UserContent::Image {
                    data: ImageData::Base64("AAEC".into()),
                    mime_type: Some("image/png".into()),
                },
                UserContent::Image {
                    data: ImageData::Url("https://example.com/cat.jpg".into()),
                    mime_type: None,
                },
            ],
        }]);

        assert_eq!(
            messages[0],
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is this?"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAEC"}},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.jpg"}}
                ]
            })
        );
    }

    #[test]
    fn test_base64_image_defaults_to_jpeg() {
        let messages = convert_to_chat_messages(&[Message::User {
            content: vec![UserContent::Image {
                data: ImageData::Base64("AAEC".into()),
                mime_type: None,
            }],
        }]);

        assert_eq!(
            messages[0]["content"][0]["image_url"]["url"],
            json!("data:image/jpeg;base64,AAEC")
        );
    }

    #[test]
    fn test_assistant_tool_calls_and_results() {
        let messages = convert_to_chat_messages(&[
            Message::Assistant {
                content: vec![
                    AssistantContent::Text("Let me check.".into()),
                    AssistantContent::ToolCall {
                        tool_call_id: "call_1".into(),
                        tool_name: "weather".into(),
                        args: json!({"city": "Paris"}),
                    },
                ],
            },
            Message::tool_result("call_1", "weather", json!({"temp": 21})),
        ]);

        assert_eq!(
            messages,
            vec![
                json!({
                    "role": "assistant",
                    "content": "Let me check.",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "weather", "arguments": "{\"city\":\"Paris\"}"}
                    }]
                }),
                json!({"role": "tool", "tool_call_id": "call_1", "content": "{\"temp\":21}"}),
            ]
        );
    }

    #[test]
    fn test_plain_assistant_has_no_tool_calls_field() {
        let messages = convert_to_chat_messages(&[Message::assistant("Hi")]);
        assert_eq!(messages[0], json!({"role": "assistant", "content": "Hi"}));
    }
}
