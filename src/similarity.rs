use ndarray::Array1;

use crate::error::{ChatbotError, Result};

/// Cosine similarity of two vectors; 0.0 when either has zero magnitude.
pub fn cosine_similarity(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let dot_product = a.dot(b);
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Index and score of the candidate closest to `query`.
///
/// Ties go to the earliest candidate.
pub fn best_match(query: &Array1<f64>, candidates: &[Array1<f64>]) -> Result<(usize, f64)> {
    let (first, rest) = candidates
        .split_first()
        .ok_or(ChatbotError::EmptyCandidates)?;

    let mut best_index = 0;
    let mut best_score = cosine_similarity(query, first);
    for (offset, candidate) in rest.iter().enumerate() {
        let score = cosine_similarity(query, candidate);
        if score > best_score {
            best_score = score;
            best_index = offset + 1;
        }
    }

    Ok((best_index, best_score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = array![0.3, 0.0, 1.2, 0.7];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = Array1::<f64>::zeros(3);
        let v = array![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let query = array![1.0, 0.0, 0.0];
        let candidates = vec![array![0.0, 1.0, 0.0], array![1.0, 1.0, 0.0], array![2.0, 0.0, 0.0]];
        let (index, score) = best_match(&query, &candidates).unwrap();
        assert_eq!(index, 2);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_ties_keep_first() {
        let query = array![1.0, 1.0];
        let candidates = vec![array![0.0, 1.0], array![1.0, 0.0], array![0.0, 1.0]];
        let (index, _) = best_match(&query, &candidates).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_best_match_all_zero_returns_first() {
        let query = Array1::<f64>::zeros(2);
        let candidates = vec![array![1.0, 0.0], array![0.0, 1.0]];
        assert_eq!(best_match(&query, &candidates).unwrap(), (0, 0.0));
    }

    #[test]
    fn test_best_match_empty_candidates() {
        let query = array![1.0];
        assert_eq!(best_match(&query, &[]), Err(ChatbotError::EmptyCandidates));
    }

    proptest! {
        #[test]
        fn non_negative_vectors_score_in_unit_range(
            pair in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..16)
        ) {
            let a: Array1<f64> = pair.iter().map(|p| p.0).collect();
            let b: Array1<f64> = pair.iter().map(|p| p.1).collect();
            let score = cosine_similarity(&a, &b);
            prop_assert!(score >= 0.0);
            prop_assert!(score <= 1.0 + 1e-9);
        }
    }
}
