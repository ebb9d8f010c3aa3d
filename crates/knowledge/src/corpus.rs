use anyhow::{Context, Result};
use clinical_rag_common::KnowledgeDocument;
use std::path::Path;
use tracing::info;

/// The clinical corpus shipped with the service. Fixed at build time.
pub fn bundled_corpus() -> Result<Vec<KnowledgeDocument>> {
    let corpus: Vec<KnowledgeDocument> =
        serde_json::from_str(include_str!("../data/corpus.json"))
            .context("bundled corpus is not valid JSON")?;

    info!("Loaded bundled corpus with {} documents", corpus.len());

    Ok(corpus)
}

/// Load a deploy-time corpus override from a JSON file matching the
/// bundled schema.
pub fn load_corpus(path: &Path) -> Result<Vec<KnowledgeDocument>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;

    let corpus: Vec<KnowledgeDocument> = serde_json::from_str(&raw)
        .with_context(|| format!("corpus file {} is not valid JSON", path.display()))?;

    info!("Loaded corpus from {} with {} documents", path.display(), corpus.len());

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinical_rag_common::DocumentCategory;

    #[test]
    fn test_bundled_corpus_parses() {
        let corpus = bundled_corpus().unwrap();
        assert!(corpus.len() >= 10);
    }

    #[test]
    fn test_bundled_corpus_ids_are_unique() {
        let corpus = bundled_corpus().unwrap();
        let mut ids: Vec<_> = corpus.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn test_bundled_corpus_covers_all_categories() {
        let corpus = bundled_corpus().unwrap();
        for category in [
            DocumentCategory::Protocol,
            DocumentCategory::DrugInfo,
            DocumentCategory::Policy,
            DocumentCategory::Triage,
        ] {
            assert!(
                corpus.iter().any(|d| d.category == category),
                "no document in category {}",
                category
            );
        }
    }
}
