//! Example of a buffered completion with the instruct model
//!
//! Run with `ONEROUTER_API_KEY` set.

use anyhow::Result;
use onerouter::prelude::*;
use onerouter::providers::Logprobs;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let router = OneRouter::strict_default()?;
    let model = router.completion(
        "openai/gpt-3.5-turbo-instruct",
        CompletionSettings::new().with_logprobs(Logprobs::Top(3)),
    );

    let options = CallOptions::builder()
        .prompt("Write a haiku about Rust programming:\n")
        .max_tokens(64)
        .temperature(0.7)
        .build();

    let response = model.do_generate(options).await?;

    println!("{}", response.text());
    println!(
        "\nfinish reason: {}, tokens: {} prompt + {} completion",
        response.finish_reason, response.usage.prompt_tokens, response.usage.completion_tokens
    );

    if let Some(logprobs) = &response.logprobs {
        for entry in logprobs.iter().take(5) {
            println!("{:>12?} {:.4}", entry.token, entry.logprob);
        }
    }

    Ok(())
}
