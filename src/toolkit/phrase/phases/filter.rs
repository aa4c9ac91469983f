

use tracing::debug;

use super::check_vectors;
use crate::core::error::Result;
use crate::llm::embeddings::Embedder;
use crate::toolkit::phrase::similarity::cosine_similarity;

/// Keeps the `top_k` words closest to `target`, embedding the whole pool in one batch.
///
/// Ties keep pool order. A pool no larger than `top_k` is returned as-is without
/// touching the embedder.
pub async fn filter_relevant(
    embedder: &dyn Embedder,
    words: &[String],
    target: &[f32],
    top_k: usize,
) -> Result<Vec<String>> {
    if top_k == 0 || words.is_empty() {
        return Ok(Vec::new());
    }
    if top_k >= words.len() {
        return Ok(words.to_vec());
    }

    let vectors = embedder.embed_batch(words).await?;
    check_vectors(words.len(), target.len(), &vectors)?;

    let mut scored: Vec<(&String, f64)> = words
        .iter()
        .zip(vectors.iter())
        .map(|(word, vector)| (word, cosine_similarity(target, vector)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    debug!(
        "Relevance filter: pool={}, kept={}, best={:?}",
        words.len(),
        top_k,
        scored.first().map(|(w, s)| (w.as_str(), *s))
    );

    Ok(scored
        .into_iter()
        .take(top_k)
        .map(|(word, _)| word.clone())
        .collect())
}
