pub mod capability;
pub mod openai;
pub mod orchestrator;

pub use capability::{EmbeddingCapability, GenerationCapability};
pub use openai::OpenAiClient;
pub use orchestrator::{GenerationOrchestrator, GroundedAnswer};
