use std::sync::Arc;

use thread_recap::config::AppConfig;
use thread_recap::email::{Composer, PostmarkClient};
use thread_recap::http::{AppState, router};
use thread_recap::llm::{OpenAiClient, RetryPolicy};
use thread_recap::pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("📨 Thread Recap v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   From: {}", config.from_address);
    eprintln!(
        "   OpenAI key: {}",
        if config.openai_api_key.is_some() { "set" } else { "missing (summaries will fail)" }
    );
    eprintln!(
        "   Postmark token: {}",
        if config.postmark_token.is_some() { "set" } else { "missing (delivery will fail)" }
    );
    eprintln!("   Webhook: http://{}/inbound-email\n", config.bind_addr);

    let completion = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.model.clone(),
        RetryPolicy::with_max_attempts(config.llm_max_attempts),
    ));
    let delivery = Arc::new(PostmarkClient::new(config.postmark_token.clone()));
    let composer = Composer::new(config.from_address.clone(), config.message_stream.clone());

    let pipeline = Arc::new(Pipeline::new(
        completion,
        delivery,
        composer,
        config.max_tokens_per_chunk,
    ));

    let app = router(AppState { pipeline });
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
