

use tracing::debug;

use super::check_vectors;
use crate::core::error::Result;
use crate::llm::embeddings::Embedder;
use crate::toolkit::phrase::models::ScoredPhrase;
use crate::toolkit::phrase::similarity::batch_cosine_similarity;

/// Scores every candidate against `target` with a single batch embedding call.
///
/// Output order matches input order; see [`sort_by_similarity`].
pub async fn rank_candidates(
    embedder: &dyn Embedder,
    candidates: Vec<String>,
    target: &[f32],
) -> Result<Vec<ScoredPhrase>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let vectors = embedder.embed_batch(&candidates).await?;
    check_vectors(candidates.len(), target.len(), &vectors)?;

    let scores = batch_cosine_similarity(target, &vectors);
    debug!("Ranked {} candidates", candidates.len());

    Ok(candidates
        .into_iter()
        .zip(scores)
        .map(|(phrase, similarity)| ScoredPhrase { phrase, similarity })
        .collect())
}

/// Stable descending sort; equal scores keep their generation order.
pub fn sort_by_similarity(scored: &mut [ScoredPhrase]) {
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::embeddings::StaticEmbedder;
    use crate::toolkit::phrase::similarity::MIN_SIMILARITY;

    #[tokio::test]
    async fn test_rank_preserves_input_order() {
        let embedder = StaticEmbedder::new(2)
            .with("차가운 바람", vec![0.0, 1.0])
            .with("밝은 빛", vec![1.0, 0.0]);
        let candidates = vec!["차가운 바람".to_string(), "밝은 빛".to_string()];

        let ranked = rank_candidates(&embedder, candidates, &[1.0, 0.0]).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].phrase, "차가운 바람");
        assert!(ranked[0].similarity.abs() < 1e-9);
        assert_eq!(ranked[1].phrase, "밝은 빛");
        assert!((ranked[1].similarity - 1.0).abs() < 1e-9);
        assert_eq!(embedder.batch_calls(), 1);
    }

    #[tokio::test]
    async fn test_rank_empty_skips_embedding() {
        let embedder = StaticEmbedder::new(2);
        let ranked = rank_candidates(&embedder, Vec::new(), &[1.0, 0.0]).await.unwrap();
        assert!(ranked.is_empty());
        assert_eq!(embedder.batch_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_vector_candidate_ranks_last() {
        let embedder = StaticEmbedder::new(2).with("밝은 빛", vec![0.2, 0.1]);
        let candidates = vec![" ".to_string(), "밝은 빛".to_string()];

        let mut ranked = rank_candidates(&embedder, candidates, &[1.0, 0.0]).await.unwrap();
        assert_eq!(ranked[0].similarity, MIN_SIMILARITY);

        sort_by_similarity(&mut ranked);
        assert_eq!(ranked[0].phrase, "밝은 빛");
        assert_eq!(ranked[1].phrase, " ");
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut scored = vec![
            ScoredPhrase::new("가 나", 0.5),
            ScoredPhrase::new("다 라", 0.9),
            ScoredPhrase::new("마 바", 0.5),
            ScoredPhrase::new("사 아", 0.5),
        ];
        sort_by_similarity(&mut scored);
        let order: Vec<&str> = scored.iter().map(|s| s.phrase.as_str()).collect();
        assert_eq!(order, vec!["다 라", "가 나", "마 바", "사 아"]);
    }
}
