//! Example of streaming a chat response

use anyhow::Result;
use futures::StreamExt;
use onerouter::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let router = OneRouter::strict_default()?;
    let model = router.language_model("anthropic/claude-3.5-sonnet");

    let options = CallOptions::builder()
        .message(Message::system("You answer in three short sentences."))
        .message(Message::user("Why do people like Rust?"))
        .temperature(0.9)
        .build();

    println!("Streaming response from {}...\n", model.model_id());

    let response = model.do_stream(options).await?;
    for warning in &response.warnings {
        tracing::warn!(?warning, "Call warning");
    }

    let mut stream = response.stream;
    let mut accumulator = StreamAccumulator::new();

    while let Some(part) = stream.next().await {
        match &part {
            StreamPart::TextDelta { text_delta } => print!("{}", text_delta),
            StreamPart::Error(error) => eprintln!("\nstream error: {}", error),
            _ => {}
        }
        accumulator.process_part(part);
    }

    println!("\n\nStream completed: {:?}", accumulator.finish_reason());
    if let Some(usage) = accumulator.usage() {
        println!("Usage: {}", usage);
    }

    Ok(())
}
