//! Tests for core types

use onerouter_core::*;
use serde_json::json;

#[test]
fn test_message_creation() {
    let msg = Message::user("Hello, world!");
    assert_eq!(msg.role(), Role::User);
    assert!(matches!(&msg, Message::User { content } if content.len() == 1));
}

#[test]
fn test_call_options_builder() {
    let options = CallOptions::builder()
        .message(Message::system("You are helpful"))
        .message(Message::user("Hello"))
        .temperature(0.8)
        .max_tokens(100)
        .stop_sequences(["\n\n"])
        .build();

    assert_eq!(options.prompt.len(), 2);
    assert_eq!(options.input_format, InputFormat::Messages);
    assert_eq!(options.temperature, Some(0.8));
    assert_eq!(options.max_tokens, Some(100));
    assert_eq!(options.stop_sequences, vec!["\n\n".to_string()]);
    assert_eq!(options.mode, Mode::default());
}

#[test]
fn test_bare_prompt_options() {
    let options = CallOptions::from_prompt("Complete this");
    assert_eq!(options.input_format, InputFormat::Prompt);
    assert_eq!(options.prompt, vec![Message::user("Complete this")]);
}

#[test]
fn test_empty_prompt_is_rejected() {
    let result = CallOptions::builder().temperature(0.1).try_build();
    assert!(matches!(result, Err(BuildError::EmptyPrompt)));
}

#[test]
fn test_tool_creation() {
    let tool = Tool::function(
        "get_weather",
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city and state"
                }
            },
            "required": ["location"]
        }),
    )
    .with_description("Get the weather for a location");

    assert_eq!(tool.name, "get_weather");
    assert!(tool.parameters.is_object());

    let options = CallOptions::builder().prompt("Weather?").tool(tool).build();
    assert!(matches!(options.mode, Mode::Regular { ref tools, .. } if tools.len() == 1));
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::unsupported("tools").to_string(),
        "'tools' functionality not supported"
    );
    assert_eq!(
        Error::InvalidPrompt("empty".into()).to_string(),
        "Invalid prompt: empty"
    );
}

#[test]
fn test_accumulator_from_parts() {
    let mut acc = StreamAccumulator::new();
    acc.process_part(StreamPart::TextDelta {
        text_delta: "Hi".into(),
    });
    acc.process_part(StreamPart::ToolCall(ToolCall::function("c1", "lookup", "{}")));
    acc.process_part(StreamPart::Finish {
        finish_reason: FinishReason::ToolCalls,
        usage: Some(Usage {
            prompt_tokens: 3,
            completion_tokens: 4,
        }),
        logprobs: None,
    });

    assert_eq!(acc.text(), "Hi");
    assert_eq!(acc.tool_calls().len(), 1);
    assert_eq!(acc.finish_reason(), Some(FinishReason::ToolCalls));
    assert_eq!(acc.usage().map(|u| u.total_tokens()), Some(7));
}
