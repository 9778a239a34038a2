use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod api;
mod catalog;
mod config;
mod error;
mod storage;
mod story;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use storage::ArtifactStore;
use story::StoryClient;
use tts::{GoogleTranslateTts, SpeechSynthesizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Storyteller Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", config.addr);
    tracing::info!("Stories directory: {}", config.stories_dir.display());
    tracing::info!("Model: {}", config.completion.model);
    if config.completion.api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; story generation requests will fail");
    }

    let store = ArtifactStore::open(&config.stories_dir).with_context(|| {
        format!(
            "Failed to create stories directory {}",
            config.stories_dir.display()
        )
    })?;
    let engine = GoogleTranslateTts::new(&config.speech)
        .context("Failed to build speech client")?;
    let story = StoryClient::new(config.completion)
        .context("Failed to build completion client")?;

    // Create app state
    let state = Arc::new(AppState {
        story,
        speech: SpeechSynthesizer::new(Arc::new(engine)),
        store,
    });

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
