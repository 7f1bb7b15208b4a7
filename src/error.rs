use axum::http::StatusCode;
use thiserror::Error;

/// Failure kinds for the question-answering pipeline.
///
/// Fetch, format, parse, and config errors abort the whole request; embedding
/// and LLM errors abort only when they occur during the document build phase.
/// The same kinds raised per question are converted into answer markers by
/// [`crate::pipeline`] instead of failing the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch document: {0}")]
    Fetch(String),

    #[error("unsupported document format: {0} (expected .pdf or .docx)")]
    UnsupportedFormat(String),

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("no text could be extracted from the document")]
    EmptyDocument,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("embedding service error: {0}")]
    Embedding(String),

    #[error("upstream LLM error: {0}")]
    Llm(String),
}

impl PipelineError {
    /// HTTP status this error maps to when it aborts a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Fetch(_)
            | PipelineError::UnsupportedFormat(_)
            | PipelineError::Parse(_)
            | PipelineError::EmptyDocument => StatusCode::BAD_REQUEST,
            PipelineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::Embedding(_) | PipelineError::Llm(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<PipelineError> for (StatusCode, String) {
    fn from(err: PipelineError) -> Self {
        (err.status_code(), err.to_string())
    }
}
