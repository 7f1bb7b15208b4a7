use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::chunking;
use crate::document;
use crate::models::{QueryRequest, QueryResponse};
use crate::pipeline::{self, RunOptions};
use crate::state::AppState;

/// POST /api/v1/hackrx/run - Answer questions about a document:
///   1. Fetch the document URL and extract text (PDF or DOCX)
///   2. Chunk the text into overlapping windows
///   3. Embed all chunks into a per-request vector store (barrier)
///   4. Per question, concurrently: embed → top-K cosine retrieval → LLM answer
///   5. Collect answers in input order; failed questions carry a marker
pub async fn run(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, String)> {
    let questions = validate_questions(req.questions, state.config.max_questions)?;
    state.config.validate().map_err(<(StatusCode, String)>::from)?;

    tracing::info!(
        "Processing request: {} question(s) about {}",
        questions.len(),
        req.documents
    );

    // ── Build phase (barrier): fetch → extract → chunk → embed ──
    let text = document::load_document(&state.http_client, &req.documents, &state.config)
        .await
        .map_err(<(StatusCode, String)>::from)?;

    let retrieval = &state.config.retrieval;
    let chunks = chunking::chunk_text(&text, retrieval.max_chunk_size, retrieval.chunk_overlap)
        .map_err(<(StatusCode, String)>::from)?;
    tracing::info!("Chunked document into {} chunk(s)", chunks.len());

    let store = pipeline::build_store(&state.llm, chunks, state.config.llm.embedding_dim)
        .await
        .map_err(<(StatusCode, String)>::from)?;

    // ── Question phase: concurrent, isolated per question ──
    let options = RunOptions {
        top_k: retrieval.top_k,
        llm_timeout: Duration::from_secs(state.config.llm_timeout_secs),
    };
    let answers = pipeline::answer_questions(
        &state.llm,
        &state.llm,
        &store,
        &questions,
        &options,
        &state.llm_semaphore,
    )
    .await;

    Ok(Json(QueryResponse { answers }))
}

fn validate_questions(
    questions: Vec<String>,
    max_questions: usize,
) -> Result<Vec<String>, (StatusCode, String)> {
    if questions.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "At least one question is required".to_string(),
        ));
    }
    if questions.len() > max_questions {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Too many questions (maximum {max_questions})"),
        ));
    }

    let trimmed: Vec<String> = questions.iter().map(|q| q.trim().to_string()).collect();
    if trimmed.iter().any(|q| q.is_empty()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Questions must not be empty".to_string(),
        ));
    }

    Ok(trimmed)
}
