use async_trait::async_trait;
use clinical_rag_common::CapabilityError;

/// Text-to-vector capability backed by an external service. Calls may fail
/// transiently or permanently; callers decide whether a failure is fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError>;
}

/// Prompt-to-text capability backed by an external service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError>;
}
