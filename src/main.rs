use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use doc_qa::api;
use doc_qa::config::Config;
use doc_qa::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        anyhow::bail!("refusing to start: {e}");
    }
    tracing::info!(
        "LLM provider: {} ({}), chunk size {} / overlap {} / top-K {}",
        config.llm.provider,
        config.llm.base_url,
        config.retrieval.max_chunk_size,
        config.retrieval.chunk_overlap,
        config.retrieval.top_k
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;

    let app = Router::new()
        .route("/api/v1/hackrx/health", get(api::health))
        .route("/api/v1/hackrx/run", post(api::run::run))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
