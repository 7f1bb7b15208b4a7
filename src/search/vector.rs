//! In-memory per-request vector store with cosine similarity top-K lookup.
//!
//! The store is populated once during the document build phase and is
//! read-only afterwards, so concurrent question tasks share it by reference
//! with no locking.

use crate::chunking::Chunk;
use crate::error::PipelineError;

#[derive(Debug)]
struct Entry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// A retrieved chunk with its cosine similarity to the query, in [-1, 1].
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug)]
pub struct VectorStore {
    entries: Vec<Entry>,
    dim: usize,
}

impl VectorStore {
    /// Create an empty store. All vectors added or queried must have
    /// dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    /// Add chunks with their embeddings. `embeddings` must be parallel with
    /// `chunks` and every vector must match the store dimension.
    pub fn add_chunks(
        &mut self,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), PipelineError> {
        if chunks.len() != embeddings.len() {
            return Err(PipelineError::Embedding(format!(
                "embedding count ({}) does not match chunk count ({})",
                embeddings.len(),
                chunks.len()
            )));
        }

        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            if embedding.len() != self.dim {
                return Err(PipelineError::Embedding(format!(
                    "embedding for chunk {} has dimension {} (store expects {})",
                    chunk.index,
                    embedding.len(),
                    self.dim
                )));
            }
            self.entries.push(Entry { chunk, embedding });
        }

        Ok(())
    }

    /// Return the `k` chunks most similar to `query`, descending by cosine
    /// similarity. Ties keep insertion order (the sort is stable). `k` larger
    /// than the store returns everything, sorted. There is no similarity
    /// floor: the best-available chunks are returned even when all scores are
    /// low.
    pub fn top_k(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, PipelineError> {
        if k == 0 {
            return Err(PipelineError::Config(
                "top-K must be at least 1".to_string(),
            ));
        }
        if query.len() != self.dim {
            return Err(PipelineError::Embedding(format!(
                "query embedding has dimension {} (store expects {})",
                query.len(),
                self.dim
            )));
        }

        let mut scored: Vec<(f32, &Entry)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query, &e.embedding), e))
            .collect();

        // Stable sort, descending by score: equal scores keep chunk order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(score, e)| ScoredChunk {
                chunk: e.chunk.clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Dot product over the product of magnitudes. A zero-magnitude vector on
/// either side yields 0.0 rather than an error.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
