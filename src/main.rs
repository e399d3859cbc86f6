use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cofog_assistant::api;
use cofog_assistant::config::Config;
use cofog_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so the API key does not need exporting by hand
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    tracing::info!("Corpus directory: {}", config.corpus.root.display());
    tracing::info!(
        "LLM provider: {} ({}, model {})",
        config.llm.provider,
        config.llm.endpoint(),
        config.llm.chat_model
    );

    let state = AppState::new(config.clone())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(
        "Server listening on {} (debug={})",
        config.bind_addr,
        config.debug
    );

    axum::serve(listener, app).await?;
    Ok(())
}
