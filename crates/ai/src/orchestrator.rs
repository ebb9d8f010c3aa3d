use clinical_rag_common::{CapabilityError, GroundingRef, ScoredDocument};
use std::sync::Arc;
use tracing::{debug, info};

use crate::capability::GenerationCapability;

const SYSTEM_PERSONA: &str = "You are a clinical decision-support assistant for hospital staff. \
     You answer questions about clinical protocols, medications, policies, and triage.";

/// A generated answer plus the documents it was grounded on, in rank order.
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    pub answer: String,
    pub grounding: Vec<GroundingRef>,
}

/// Builds a grounded prompt from retrieved documents and caller-supplied
/// structured context, then invokes the generation capability. Generation
/// failure is fatal for the request; there is no degraded answer without it.
pub struct GenerationOrchestrator {
    generator: Arc<dyn GenerationCapability>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn GenerationCapability>) -> Self {
        Self { generator }
    }

    /// Joins retrieved documents as `[category] title: content` blocks in
    /// rank order, separated by blank lines. An empty retrieval yields an
    /// empty context string, not an error.
    pub fn build_context(results: &[ScoredDocument]) -> String {
        results
            .iter()
            .map(|scored| {
                format!(
                    "[{}] {}: {}",
                    scored.document.category, scored.document.title, scored.document.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Deterministic prompt template. The structured context is serialized
    /// verbatim; it is owned and pre-validated by the caller.
    pub fn build_prompt(
        query: &str,
        patient_context: Option<&serde_json::Value>,
        knowledge_context: &str,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(SYSTEM_PERSONA);
        prompt.push_str("\n\n");

        if let Some(context) = patient_context {
            prompt.push_str("Patient context:\n");
            prompt.push_str(&context.to_string());
            prompt.push_str("\n\n");
        }

        prompt.push_str("Reference material from the clinical knowledge base:\n");
        prompt.push_str(knowledge_context);
        prompt.push_str("\n\n");

        prompt.push_str("Question: ");
        prompt.push_str(query);
        prompt.push_str("\n\n");

        prompt.push_str(
            "Answer using the reference material above whenever it is relevant. \
             If the reference material does not cover the question, give general \
             clinical guidance and state explicitly that the answer is not \
             grounded in a hospital protocol.",
        );

        prompt
    }

    pub async fn answer(
        &self,
        query: &str,
        patient_context: Option<&serde_json::Value>,
        results: &[ScoredDocument],
    ) -> Result<GroundedAnswer, CapabilityError> {
        let knowledge_context = Self::build_context(results);
        let prompt = Self::build_prompt(query, patient_context, &knowledge_context);

        debug!(
            "Generating answer with {} grounding documents, prompt {} chars",
            results.len(),
            prompt.len()
        );

        let answer = self.generator.generate(&prompt).await?;

        info!("Generated answer grounded on {} documents", results.len());

        Ok(GroundedAnswer {
            answer,
            grounding: results.iter().map(GroundingRef::from).collect(),
        })
    }
}
