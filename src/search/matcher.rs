//! Question → top-K chunk retrieval.
//!
//! Thin orchestration: normalize the question, embed it with the same
//! embedder the chunks went through, and delegate to the vector store.

use crate::error::PipelineError;
use crate::llm::Embedder;
use crate::query;
use crate::search::vector::{ScoredChunk, VectorStore};

/// Retrieve the `k` chunks most relevant to `question`.
pub async fn find_relevant<E: Embedder + ?Sized>(
    embedder: &E,
    store: &VectorStore,
    question: &str,
    k: usize,
) -> Result<Vec<ScoredChunk>, PipelineError> {
    let normalized = query::normalize(question);
    if normalized.is_empty() {
        return Err(PipelineError::Parse("question is empty".to_string()));
    }

    let embedding = embedder
        .embed_single(&normalized)
        .await
        .map_err(|e| PipelineError::Embedding(format!("{e:#}")))?;

    store.top_k(&embedding, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use anyhow::Result;
    use async_trait::async_trait;

    /// Embeds text as [1,0] when it mentions "premium", else [0,1].
    struct TopicEmbedder;

    #[async_trait]
    impl Embedder for TopicEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.to_lowercase().contains("premium") {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }
    }

    fn store_with_topics() -> VectorStore {
        let chunks = vec![
            Chunk {
                index: 0,
                text: "The premium is due monthly.".to_string(),
                start: 0,
                end: 27,
            },
            Chunk {
                index: 1,
                text: "Claims are settled within 30 days.".to_string(),
                start: 27,
                end: 61,
            },
        ];
        let mut store = VectorStore::new(2);
        store
            .add_chunks(chunks, vec![vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_matches_question_topic() {
        let store = store_with_topics();
        let results = find_relevant(&TopicEmbedder, &store, "When is the premium due?", 1)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.index, 0);
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let store = store_with_topics();
        let err = find_relevant(&TopicEmbedder, &store, "   ", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[tokio::test]
    async fn test_k_larger_than_store_returns_all() {
        let store = store_with_topics();
        let results = find_relevant(&TopicEmbedder, &store, "anything at all", 10)
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }
}
