use async_trait::async_trait;
use clinical_rag_ai::EmbeddingCapability;
use clinical_rag_common::{CapabilityError, DocumentCategory, KnowledgeDocument};
use std::collections::HashMap;

pub(crate) fn doc(id: &str, content: &str) -> KnowledgeDocument {
    KnowledgeDocument {
        id: id.to_string(),
        category: DocumentCategory::Protocol,
        title: id.to_string(),
        content: content.to_string(),
        tags: vec![],
    }
}

/// Deterministic embedder keyed on input text; unknown text fails the way
/// an unreachable embedding service would.
pub(crate) struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl FixedEmbedder {
    pub(crate) fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: pairs
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingCapability for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| CapabilityError::Embedding("service unreachable".to_string()))
    }
}
