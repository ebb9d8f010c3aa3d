pub mod error;
pub mod routes;

use clinical_rag_ai::GenerationOrchestrator;
use clinical_rag_knowledge::RetrievalService;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "clinical-rag-api";

/// Per-process state shared by all request tasks. Holds only read-only
/// services; the retrieval service wraps a store that finished building
/// before this state could be constructed, so no request can observe an
/// initializing store.
#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<RetrievalService>,
    pub orchestrator: Arc<GenerationOrchestrator>,
}

impl AppState {
    pub fn new(retrieval: RetrievalService, orchestrator: GenerationOrchestrator) -> Self {
        Self {
            retrieval: Arc::new(retrieval),
            orchestrator: Arc::new(orchestrator),
        }
    }
}

pub use routes::create_router;
