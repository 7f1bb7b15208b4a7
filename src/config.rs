use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Chunking and retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Document download timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Maximum document size in MB
    pub max_document_mb: u64,
    /// Maximum number of questions per request
    pub max_questions: usize,
    /// Maximum concurrent LLM calls across one request's questions
    pub max_concurrent_llm_calls: usize,
    /// Per-call LLM timeout in seconds
    pub llm_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum chunk size in characters
    pub max_chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for answer generation
    pub chat_model: String,
    /// Model name for embeddings
    pub embedding_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            llm: LlmConfig::default(),
            retrieval: RetrievalConfig::default(),
            fetch_timeout_secs: 30,
            max_document_mb: 25,
            max_questions: 50,
            max_concurrent_llm_calls: 3,
            llm_timeout_secs: 60,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            api_key: None,
            embedding_dim: 768,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("DOCQA_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("MAX_CHUNK_SIZE") {
            if let Ok(v) = val.parse() {
                config.retrieval.max_chunk_size = v;
            }
        }
        if let Ok(val) = std::env::var("CHUNK_OVERLAP") {
            if let Ok(v) = val.parse() {
                config.retrieval.chunk_overlap = v;
            }
        }
        if let Ok(val) = std::env::var("TOP_K_RESULTS") {
            if let Ok(v) = val.parse() {
                config.retrieval.top_k = v;
            }
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(model) = std::env::var("LLM_EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("LLM_EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.llm.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("DOCQA_FETCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.fetch_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("DOCQA_MAX_DOCUMENT_MB") {
            if let Ok(v) = val.parse() {
                config.max_document_mb = v;
            }
        }
        if let Ok(val) = std::env::var("DOCQA_MAX_QUESTIONS") {
            if let Ok(v) = val.parse() {
                config.max_questions = v;
            }
        }
        if let Ok(val) = std::env::var("DOCQA_MAX_CONCURRENT_LLM_CALLS") {
            if let Ok(v) = val.parse() {
                config.max_concurrent_llm_calls = v;
            }
        }
        if let Ok(val) = std::env::var("DOCQA_LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.llm_timeout_secs = v;
            }
        }

        config
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.retrieval.max_chunk_size == 0 {
            return Err(PipelineError::Config(
                "MAX_CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.retrieval.chunk_overlap >= self.retrieval.max_chunk_size {
            return Err(PipelineError::Config(format!(
                "CHUNK_OVERLAP ({}) must be smaller than MAX_CHUNK_SIZE ({})",
                self.retrieval.chunk_overlap, self.retrieval.max_chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(PipelineError::Config(
                "TOP_K_RESULTS must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_llm_calls == 0 {
            return Err(PipelineError::Config(
                "DOCQA_MAX_CONCURRENT_LLM_CALLS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_document_bytes(&self) -> u64 {
        self.max_document_mb * 1024 * 1024
    }
}
