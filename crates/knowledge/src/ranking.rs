use clinical_rag_common::ScoredDocument;

/// How many documents ground an answer unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Cosine similarity between two vectors of equal dimension.
///
/// Returns NaN when either vector has zero magnitude; callers must guard
/// zero vectors before feeding scores into ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have equal dimension");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    dot / (norm_a * norm_b)
}

/// Selects the `min(k, len)` highest-scoring documents, descending by score.
/// The sort is stable, so equal scores keep corpus insertion order and the
/// result is deterministic.
pub fn top_k(mut scored: Vec<ScoredDocument>, k: usize) -> Vec<ScoredDocument> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinical_rag_common::{DocumentCategory, KnowledgeDocument};

    fn scored(id: &str, score: f32) -> ScoredDocument {
        ScoredDocument {
            document: KnowledgeDocument {
                id: id.to_string(),
                category: DocumentCategory::Protocol,
                title: id.to_string(),
                content: String::new(),
                tags: vec![],
            },
            score,
        }
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = [0.3, -0.7, 0.2, 0.9];
        let b = [0.1, 0.4, -0.5, 0.8];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_self_similarity_is_one() {
        let a = [0.3, -0.7, 0.2, 0.9];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_nan() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
    }

    #[test]
    fn test_top_k_sorts_descending_and_truncates() {
        let ranked = top_k(vec![scored("a", 0.1), scored("b", 0.9), scored("c", 0.5)], 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].document.id, "b");
        assert_eq!(ranked[1].document.id, "c");
    }

    #[test]
    fn test_top_k_never_exceeds_len() {
        let ranked = top_k(vec![scored("a", 0.1)], 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_top_k_ties_keep_insertion_order() {
        let ranked = top_k(
            vec![scored("first", 0.5), scored("second", 0.5), scored("third", 0.5)],
            3,
        );

        let ids: Vec<_> = ranked.iter().map(|s| s.document.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
