pub mod corpus;
pub mod ranking;
pub mod retrieval;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util;

pub use corpus::{bundled_corpus, load_corpus};
pub use ranking::{cosine_similarity, top_k, DEFAULT_TOP_K};
pub use retrieval::RetrievalService;
pub use store::KnowledgeStore;
