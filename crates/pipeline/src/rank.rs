//! Similarity ranking: score a cluster subset against the user vector and
//! keep the top K.

use crate::candidate::RankedCandidate;
use catalog::Course;
use models::{SparseVector, Vectorize};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Default number of candidates that leave the ranker.
pub const DEFAULT_TOP_K: usize = 25;

/// Ranks a cluster subset by cosine similarity to the user vector.
///
/// ## Algorithm
/// 1. Vectorize every candidate description (in parallel; an empty
///    description becomes the zero vector, never an error)
/// 2. Cosine similarity against the user vector
/// 3. Stable sort descending; ties keep catalog order
/// 4. Truncate to `top_k`
#[derive(Clone)]
pub struct SimilarityRanker {
    vectorizer: Arc<dyn Vectorize>,
}

impl SimilarityRanker {
    pub fn new(vectorizer: Arc<dyn Vectorize>) -> Self {
        Self { vectorizer }
    }

    /// Rank `subset` against `user_vector`, returning at most `top_k`
    /// candidates in non-increasing similarity order.
    ///
    /// An empty subset returns an empty sequence, not an error.
    pub fn rank(
        &self,
        user_vector: &SparseVector,
        subset: &[Course],
        top_k: usize,
    ) -> Vec<RankedCandidate> {
        if subset.is_empty() {
            debug!("Similarity ranker received an empty subset");
            return Vec::new();
        }

        let mut candidates: Vec<RankedCandidate> = subset
            .par_iter()
            .map(|course| {
                let course_vector = self.vectorizer.vectorize(&course.description);
                RankedCandidate::from_course(course, user_vector.cosine(&course_vector))
            })
            .collect();

        // Cosine is guarded against NaN, and `sort_by` is stable, so ties
        // preserve the subset's catalog order.
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(top_k);

        debug!(
            "Ranked {} candidates, kept top {}",
            subset.len(),
            candidates.len()
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::TfidfVectorizer;
    use std::collections::HashMap;

    fn vectorizer() -> Arc<dyn Vectorize> {
        let vocabulary = HashMap::from([
            ("biology".to_string(), 0),
            ("math".to_string(), 1),
        ]);
        Arc::new(TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap())
    }

    fn course(key: &str, description: &str) -> Course {
        Course {
            key: key.to_string(),
            title: key.to_string(),
            description: description.to_string(),
            minimum_credits: None,
            cluster: 0,
        }
    }

    fn user_vector() -> SparseVector {
        // Pure "biology" interest.
        SparseVector::from_pairs(2, vec![(0, 1.0)])
    }

    #[test]
    fn test_rank_orders_descending() {
        let ranker = SimilarityRanker::new(vectorizer());
        let subset = vec![
            course("MIXED", "biology math"),
            course("BIO", "biology biology"),
            course("MATH", "math"),
        ];

        let ranked = ranker.rank(&user_vector(), &subset, DEFAULT_TOP_K);

        let keys: Vec<_> = ranked.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["BIO", "MIXED", "MATH"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        assert!(ranked[0].similarity > 0.99);
        assert_eq!(ranked[2].similarity, 0.0);
    }

    #[test]
    fn test_rank_bounded_by_top_k() {
        let ranker = SimilarityRanker::new(vectorizer());
        let subset: Vec<Course> = (0..10)
            .map(|i| course(&format!("C{i}"), "biology"))
            .collect();

        assert_eq!(ranker.rank(&user_vector(), &subset, 3).len(), 3);
        assert_eq!(ranker.rank(&user_vector(), &subset, 0).len(), 0);
        assert_eq!(ranker.rank(&user_vector(), &subset, 50).len(), 10);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let ranker = SimilarityRanker::new(vectorizer());
        // Identical descriptions: identical similarity for all three.
        let subset = vec![
            course("FIRST", "biology"),
            course("SECOND", "biology"),
            course("THIRD", "biology"),
        ];

        let ranked = ranker.rank(&user_vector(), &subset, DEFAULT_TOP_K);
        let keys: Vec<_> = ranked.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_empty_subset_returns_empty() {
        let ranker = SimilarityRanker::new(vectorizer());
        assert!(ranker.rank(&user_vector(), &[], DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn test_empty_description_scores_zero() {
        let ranker = SimilarityRanker::new(vectorizer());
        let subset = vec![course("EMPTY", ""), course("BIO", "biology")];

        let ranked = ranker.rank(&user_vector(), &subset, DEFAULT_TOP_K);
        assert_eq!(ranked[0].key, "BIO");
        assert_eq!(ranked[1].key, "EMPTY");
        assert_eq!(ranked[1].similarity, 0.0);
    }

    #[test]
    fn test_similarities_within_unit_interval() {
        let ranker = SimilarityRanker::new(vectorizer());
        let subset = vec![
            course("A", "biology math biology"),
            course("B", "math math"),
            course("C", ""),
        ];

        for candidate in ranker.rank(&user_vector(), &subset, DEFAULT_TOP_K) {
            assert!((0.0..=1.0).contains(&candidate.similarity));
        }
    }
}
