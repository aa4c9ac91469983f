

/// Score given to any comparison that has no defined cosine (zero-magnitude,
/// empty or mismatched vectors, non-finite components). It is the minimum
/// cosine value, so such candidates sort last.
pub const MIN_SIMILARITY: f64 = -1.0;


pub fn cosine_similarity(vec1: &[f32], vec2: &[f32]) -> f64 {
    if vec1.is_empty() || vec1.len() != vec2.len() {
        return MIN_SIMILARITY;
    }

    let (dot_product, mag1, mag2) = vec1.iter().zip(vec2.iter()).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, m1, m2), (&a, &b)| {
            let (a, b) = (f64::from(a), f64::from(b));
            (dot + a * b, m1 + a * a, m2 + b * b)
        },
    );

    if mag1 == 0.0 || mag2 == 0.0 {
        return MIN_SIMILARITY;
    }

    let similarity = dot_product / (mag1.sqrt() * mag2.sqrt());
    if !similarity.is_finite() {
        return MIN_SIMILARITY;
    }
    similarity.clamp(-1.0, 1.0)
}


pub fn batch_cosine_similarity(query: &[f32], candidates: &[Vec<f32>]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| cosine_similarity(query, candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![0.3, -0.4, 0.5];
        assert!((cosine_similarity(&vec, &vec) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_ignores_magnitude() {
        let sim = cosine_similarity(&[1.0, 1.0], &[10.0, 10.0]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        let vectors = [
            vec![0.1, 0.9, -0.3],
            vec![-0.7, 0.2, 0.4],
            vec![5.0, 5.0, 5.0],
            vec![-1.0, -1.0, 0.001],
        ];
        for a in &vectors {
            for b in &vectors {
                let sim = cosine_similarity(a, b);
                assert!((-1.0..=1.0).contains(&sim), "{} out of bounds", sim);
            }
        }
    }

    #[test]
    fn test_zero_vector_scores_minimum() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), MIN_SIMILARITY);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), MIN_SIMILARITY);
    }

    #[test]
    fn test_mismatched_or_empty_scores_minimum() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), MIN_SIMILARITY);
        assert_eq!(cosine_similarity(&[], &[]), MIN_SIMILARITY);
    }

    #[test]
    fn test_nan_component_scores_minimum() {
        let sim = cosine_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]);
        assert_eq!(sim, MIN_SIMILARITY);
    }

    #[test]
    fn test_batch_cosine_similarity() {
        let scores = batch_cosine_similarity(&[1.0, 0.0], &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0]]);
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!(scores[1].abs() < 1e-9);
        assert_eq!(scores[2], MIN_SIMILARITY);
    }
}
