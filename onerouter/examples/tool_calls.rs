//! Example of a tool-calling round trip on the chat endpoint

use anyhow::{bail, Result};
use onerouter::prelude::*;
use onerouter::AssistantContent;
use serde_json::{json, Value};

fn weather(location: &str) -> Value {
    json!({"location": location, "temperature_c": 21, "conditions": "sunny"})
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let router = OneRouter::builder().header("X-Title", "onerouter-demos").build()?;
    let model = router.chat("openai/gpt-4o-mini", ChatSettings::default());

    let tool = Tool::function(
        "get_weather",
        json!({
            "type": "object",
            "properties": {"location": {"type": "string"}},
            "required": ["location"]
        }),
    )
    .with_description("Get the current weather for a location");

    let mut messages = vec![Message::user("What's the weather in Lisbon?")];

    let response = model
        .do_generate(
            CallOptions::builder()
                .messages(messages.clone())
                .tool(tool.clone())
                .build(),
        )
        .await?;

    if !response.has_tool_calls() {
        bail!("model answered without calling the tool: {}", response.text());
    }

    let mut calls = Vec::new();
    let mut results = Vec::new();
    for call in &response.tool_calls {
        let args: Value = serde_json::from_str(&call.args)?;
        let location = args["location"].as_str().unwrap_or("unknown");
        println!("-> {}({})", call.tool_name, location);
        let result = weather(location);

        calls.push(AssistantContent::ToolCall {
            tool_call_id: call.tool_call_id.clone(),
            tool_name: call.tool_name.clone(),
            args,
        });
        results.push(Message::tool_result(
            call.tool_call_id.clone(),
            call.tool_name.clone(),
            result,
        ));
    }

    messages.push(Message::Assistant { content: calls });
    messages.extend(results);

    let response = model
        .do_generate(CallOptions::builder().messages(messages).tool(tool).build())
        .await?;

    println!("{}", response.text());

    Ok(())
}
