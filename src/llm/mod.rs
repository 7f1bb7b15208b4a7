//! LLM access: pluggable `Embedder`/`Generator` traits and the HTTP-backed
//! client for Ollama or OpenAI-compatible APIs.

pub mod chat;
pub mod embed;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::LlmConfig;

/// Turns text into a fixed-length embedding vector. Chunks and questions must
/// go through the same embedder so their vectors are comparable.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results.into_iter().next().context("no embedding returned")
    }
}

/// Submits a prompt to a language model and returns its textual answer.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// HTTP client for the configured LLM provider. Cheap to clone: the inner
/// `reqwest::Client` is an `Arc` around its connection pool.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for LlmClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        embed::embed_batch(&self.http, &self.config, texts).await
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        chat::generate(&self.http, &self.config, prompt).await
    }
}
