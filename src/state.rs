use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmClient;

/// Shared application state, constructed once in `main` and cloned into
/// handlers. There is no ambient global: everything a request needs comes
/// through here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub llm: LlmClient,
    /// Bounds concurrent LLM calls across a request's question tasks
    pub llm_semaphore: Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        let llm = LlmClient::new(http_client.clone(), config.llm.clone());
        let llm_semaphore = Arc::new(tokio::sync::Semaphore::new(config.max_concurrent_llm_calls));

        Ok(Self {
            config,
            http_client,
            llm,
            llm_semaphore,
        })
    }
}
