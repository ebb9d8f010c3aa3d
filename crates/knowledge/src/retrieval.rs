use clinical_rag_ai::EmbeddingCapability;
use clinical_rag_common::{RetrievalResult, ScoredDocument};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ranking::{cosine_similarity, top_k, DEFAULT_TOP_K};
use crate::store::KnowledgeStore;

/// Turns a free-text query into a ranked document list by embedding the
/// query and scoring it against every stored vector. Brute force is fine at
/// this corpus scale; an index would slot in behind `retrieve` unchanged.
pub struct RetrievalService {
    store: Arc<KnowledgeStore>,
    embedder: Arc<dyn EmbeddingCapability>,
    top_k: usize,
}

impl RetrievalService {
    pub fn new(store: Arc<KnowledgeStore>, embedder: Arc<dyn EmbeddingCapability>) -> Self {
        Self {
            store,
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieval never fails the request. A query-embedding failure, an
    /// empty store, or an unusable query vector all degrade to an empty
    /// result; generation then proceeds ungrounded.
    pub async fn retrieve(&self, query: &str) -> RetrievalResult {
        if self.store.is_empty() {
            debug!("Knowledge store is empty, returning no matches");
            return Vec::new();
        }

        let query_vector = match self.embedder.embed(query).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!("Query embedding failed, proceeding without grounding: {}", e);
                return Vec::new();
            }
        };

        // Guard the zero-magnitude case so NaN never reaches the ranking.
        if query_vector.iter().all(|v| *v == 0.0) {
            warn!("Query embedding is empty or zero, proceeding without grounding");
            return Vec::new();
        }

        if Some(query_vector.len()) != self.store.dimension() {
            warn!(
                "Query embedding dimension {} does not match store dimension {:?}",
                query_vector.len(),
                self.store.dimension()
            );
            return Vec::new();
        }

        let scored: Vec<ScoredDocument> = self
            .store
            .entries()
            .iter()
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: cosine_similarity(&query_vector, &entry.vector),
            })
            .collect();

        let ranked = top_k(scored, self.top_k);

        debug!("Retrieved {} documents for query ({} chars)", ranked.len(), query.len());

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{doc, FixedEmbedder};

    async fn store_with(
        embedder: &FixedEmbedder,
        docs: Vec<clinical_rag_common::KnowledgeDocument>,
    ) -> Arc<KnowledgeStore> {
        Arc::new(KnowledgeStore::build(docs, embedder).await)
    }

    #[tokio::test]
    async fn test_retrieve_ranks_by_similarity() {
        let embedder = FixedEmbedder::new(&[
            ("alpha", vec![1.0, 0.0]),
            ("beta", vec![0.0, 1.0]),
            ("q", vec![0.9, 0.1]),
        ]);
        let store = store_with(&embedder, vec![doc("d1", "alpha"), doc("d2", "beta")]).await;

        let service = RetrievalService::new(store, Arc::new(embedder));
        let results = service.retrieve("q").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "d1");
        assert_eq!(results[1].document.id, "d2");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_retrieve_caps_results_at_top_k() {
        let pairs: Vec<(&str, Vec<f32>)> = vec![
            ("c1", vec![1.0, 0.0]),
            ("c2", vec![0.9, 0.1]),
            ("c3", vec![0.7, 0.3]),
            ("c4", vec![0.2, 0.8]),
            ("c5", vec![0.0, 1.0]),
            ("q", vec![1.0, 0.0]),
        ];
        let embedder = FixedEmbedder::new(&pairs);
        let store = store_with(
            &embedder,
            vec![
                doc("d1", "c1"),
                doc("d2", "c2"),
                doc("d3", "c3"),
                doc("d4", "c4"),
                doc("d5", "c5"),
            ],
        )
        .await;

        let service = RetrievalService::new(store, Arc::new(embedder));
        let results = service.retrieve("q").await;

        assert_eq!(results.len(), 3);
        let ids: Vec<_> = results.iter().map(|s| s.document.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[tokio::test]
    async fn test_retrieve_against_empty_store_returns_empty() {
        let embedder = FixedEmbedder::new(&[("q", vec![1.0, 0.0])]);
        let store = store_with(&embedder, vec![]).await;

        let service = RetrievalService::new(store, Arc::new(embedder));
        assert!(service.retrieve("q").await.is_empty());
    }

    #[tokio::test]
    async fn test_query_embedding_failure_degrades_to_empty() {
        let embedder = FixedEmbedder::new(&[("alpha", vec![1.0, 0.0])]);
        let store = store_with(&embedder, vec![doc("d1", "alpha")]).await;

        let service = RetrievalService::new(store, Arc::new(embedder));
        // "unknown query" has no fixture vector, so the embed call fails
        assert!(service.retrieve("unknown query").await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_query_vector_degrades_to_empty() {
        let embedder =
            FixedEmbedder::new(&[("alpha", vec![1.0, 0.0]), ("q", vec![0.0, 0.0])]);
        let store = store_with(&embedder, vec![doc("d1", "alpha")]).await;

        let service = RetrievalService::new(store, Arc::new(embedder));
        assert!(service.retrieve("q").await.is_empty());
    }

    #[tokio::test]
    async fn test_with_top_k_overrides_default() {
        let embedder = FixedEmbedder::new(&[
            ("alpha", vec![1.0, 0.0]),
            ("beta", vec![0.0, 1.0]),
            ("q", vec![0.5, 0.5]),
        ]);
        let store = store_with(&embedder, vec![doc("d1", "alpha"), doc("d2", "beta")]).await;

        let service = RetrievalService::new(store, Arc::new(embedder)).with_top_k(1);
        let results = service.retrieve("q").await;

        assert_eq!(results.len(), 1);
        // Equal scores: corpus insertion order breaks the tie
        assert_eq!(results[0].document.id, "d1");
    }
}
