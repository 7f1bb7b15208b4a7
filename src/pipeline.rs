//! Request pipeline: build the per-request vector store, then answer all
//! questions concurrently.
//!
//! The build phase is a barrier: no question task starts before every chunk
//! is embedded and stored. After that the store is read-only, so question
//! tasks share it by reference. Per-question failures (query embedding,
//! retrieval, LLM call, timeout) become marker answers; they never abort the
//! request or their siblings.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::chunking::Chunk;
use crate::error::PipelineError;
use crate::evaluator;
use crate::llm::{Embedder, Generator};
use crate::search::matcher;
use crate::search::vector::VectorStore;

/// Per-request knobs for the question phase.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Chunks retrieved per question
    pub top_k: usize,
    /// Timeout for one upstream LLM call; applied separately to the query
    /// embedding and to the generate call, not to semaphore queueing
    pub llm_timeout: Duration,
}

/// Embed every chunk and build the read-only vector store. Any failure here
/// aborts the request: without embeddings no question can be answered.
pub async fn build_store<E: Embedder + ?Sized>(
    embedder: &E,
    chunks: Vec<Chunk>,
    dim: usize,
) -> Result<VectorStore, PipelineError> {
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder
        .embed_batch(&texts)
        .await
        .map_err(|e| PipelineError::Embedding(format!("{e:#}")))?;

    let mut store = VectorStore::new(dim);
    store.add_chunks(chunks, embeddings)?;
    tracing::info!("Vector store built: {} chunks, dim {}", store.len(), dim);
    Ok(store)
}

/// Answer all questions concurrently against a built store. Returns one
/// entry per question, in input order; a failed question carries its error
/// marker. The semaphore bounds concurrent LLM calls across the questions.
pub async fn answer_questions<E, G>(
    embedder: &E,
    generator: &G,
    store: &VectorStore,
    questions: &[String],
    options: &RunOptions,
    semaphore: &Semaphore,
) -> Vec<String>
where
    E: Embedder + ?Sized,
    G: Generator + ?Sized,
{
    let futures = questions.iter().enumerate().map(|(i, question)| async move {
        match answer_one(embedder, generator, store, question, options, semaphore).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Question {} failed: {e}", i + 1);
                evaluator::error_marker(&e.to_string())
            }
        }
    });

    join_all(futures).await
}

async fn answer_one<E, G>(
    embedder: &E,
    generator: &G,
    store: &VectorStore,
    question: &str,
    options: &RunOptions,
    semaphore: &Semaphore,
) -> Result<String, PipelineError>
where
    E: Embedder + ?Sized,
    G: Generator + ?Sized,
{
    let matches = tokio::time::timeout(
        options.llm_timeout,
        matcher::find_relevant(embedder, store, question, options.top_k),
    )
    .await
    .map_err(|_| {
        PipelineError::Embedding(format!(
            "query embedding timed out after {}s",
            options.llm_timeout.as_secs_f32()
        ))
    })??;
    if matches.is_empty() {
        return Ok(evaluator::NO_MATCH_ANSWER.to_string());
    }

    let prompt = evaluator::build_prompt(question, &matches);

    let _permit = semaphore
        .acquire()
        .await
        .map_err(|_| PipelineError::Llm("LLM call limiter closed".to_string()))?;

    let raw = match tokio::time::timeout(options.llm_timeout, generator.generate(&prompt)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) => return Err(PipelineError::Llm(format!("{e:#}"))),
        Err(_) => {
            return Err(PipelineError::Llm(format!(
                "request timed out after {}s",
                options.llm_timeout.as_secs_f32()
            )))
        }
    };

    Ok(evaluator::post_process_answer(&raw))
}
