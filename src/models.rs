use serde::{Deserialize, Serialize};

/// Request body for POST /api/v1/hackrx/run
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// URL of the document to analyze (PDF or DOCX)
    pub documents: String,
    /// Natural-language questions about the document
    pub questions: Vec<String>,
}

/// Response body for POST /api/v1/hackrx/run.
/// One answer per question, in input order. A failed question carries its
/// error marker here instead of failing the whole request.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub answers: Vec<String>,
}

/// Response body for GET /api/v1/hackrx/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "doc-qa is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
