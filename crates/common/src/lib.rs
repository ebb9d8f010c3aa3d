use serde::{Deserialize, Serialize};

// Knowledge corpus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    Protocol,
    DrugInfo,
    Policy,
    Triage,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Protocol => "Protocol",
            DocumentCategory::DrugInfo => "DrugInfo",
            DocumentCategory::Policy => "Policy",
            DocumentCategory::Triage => "Triage",
        }
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single corpus entry. The corpus is fixed at deploy time; documents are
/// never mutated or deleted while the service is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: String,
    pub category: DocumentCategory,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One retrieval hit: a corpus document plus its cosine similarity against
/// the query vector.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: KnowledgeDocument,
    pub score: f32,
}

/// A retrieval result is an ordered list of scored documents, descending by
/// score, at most K entries. Ephemeral per query, never persisted.
pub type RetrievalResult = Vec<ScoredDocument>;

/// Citation returned to the caller for each document that grounded an answer.
#[derive(Debug, Clone, Serialize)]
pub struct GroundingRef {
    pub title: String,
    pub category: String,
}

impl From<&ScoredDocument> for GroundingRef {
    fn from(scored: &ScoredDocument) -> Self {
        Self {
            title: scored.document.title.clone(),
            category: scored.document.category.to_string(),
        }
    }
}

// Error types for the external AI capabilities
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("embedding request failed: {0}")]
    Embedding(String),

    #[error("generation request failed: {0}")]
    Generation(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}
