use clinical_rag_ai::EmbeddingCapability;
use clinical_rag_common::KnowledgeDocument;
use tracing::{info, warn};

/// A corpus document paired with its embedding vector.
#[derive(Debug, Clone)]
pub struct EmbeddedDocument {
    pub document: KnowledgeDocument,
    pub vector: Vec<f32>,
}

/// The embedded corpus. Built exactly once at startup and immutable
/// thereafter; concurrent queries read it through a shared reference
/// without locking.
///
/// Every stored vector has the same dimensionality and a nonzero magnitude.
/// A document whose embedding fails is absent, never a placeholder.
pub struct KnowledgeStore {
    entries: Vec<EmbeddedDocument>,
}

impl KnowledgeStore {
    /// Embeds the corpus one document at a time. A per-document failure is
    /// logged and that document skipped; the build itself never fails. If
    /// the embedding service is unreachable for every document the store
    /// ends up empty and retrieval degrades to always-empty results.
    pub async fn build(
        corpus: Vec<KnowledgeDocument>,
        embedder: &dyn EmbeddingCapability,
    ) -> Self {
        let total = corpus.len();
        let mut entries: Vec<EmbeddedDocument> = Vec::with_capacity(total);

        for document in corpus {
            let vector = match embedder.embed(&document.content).await {
                Ok(vector) => vector,
                Err(e) => {
                    warn!("Skipping document '{}': embedding failed: {}", document.id, e);
                    continue;
                }
            };

            if vector.iter().all(|v| *v == 0.0) {
                warn!("Skipping document '{}': embedding is empty or zero", document.id);
                continue;
            }

            if let Some(first) = entries.first() {
                if vector.len() != first.vector.len() {
                    warn!(
                        "Skipping document '{}': dimension {} does not match store dimension {}",
                        document.id,
                        vector.len(),
                        first.vector.len()
                    );
                    continue;
                }
            }

            entries.push(EmbeddedDocument { document, vector });
        }

        info!("Knowledge store ready with {}/{} documents embedded", entries.len(), total);

        Self { entries }
    }

    /// All (document, vector) pairs in corpus insertion order.
    pub fn entries(&self) -> &[EmbeddedDocument] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality of the stored vectors, if any are stored.
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|e| e.vector.len())
    }
}
