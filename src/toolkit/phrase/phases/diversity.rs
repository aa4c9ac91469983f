

use std::collections::HashSet;

use tracing::debug;

use crate::toolkit::phrase::config::MmrWeights;
use crate::toolkit::phrase::models::{ScoredPhrase, SelectedPhrase};

fn word_set(phrase: &str) -> HashSet<&str> {
    phrase.split(' ').filter(|w| !w.is_empty()).collect()
}

/// `|a ∩ b| / |a ∪ b|` over the space-separated words of two phrases.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// `1 - min(jaccard)` against the already selected phrases; `1.0` when nothing is selected.
pub fn diversity_score<'a, I>(candidate: &str, selected: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let min_similarity = selected
        .into_iter()
        .map(|s| jaccard_similarity(candidate, s))
        .min_by(|a, b| a.total_cmp(b));

    match min_similarity {
        Some(similarity) => 1.0 - similarity,
        None => 1.0,
    }
}

/// Greedy MMR selection over candidates sorted by descending similarity.
///
/// The best match always takes the first slot. Each further slot goes to the
/// remaining candidate with the highest `weights.score(similarity, diversity)`;
/// ties go to the earlier candidate.
pub fn select_diverse(ranked: &[ScoredPhrase], top_k: usize, weights: &MmrWeights) -> Vec<SelectedPhrase> {
    if ranked.len() <= top_k {
        return ranked.iter().map(|s| SelectedPhrase::from_scored(s, None)).collect();
    }
    if top_k == 0 {
        return Vec::new();
    }

    let mut selected = vec![SelectedPhrase::from_scored(&ranked[0], None)];
    let mut remaining: Vec<&ScoredPhrase> = ranked[1..].iter().collect();

    while selected.len() < top_k && !remaining.is_empty() {
        let mut best: Option<(usize, f64, f64)> = None;

        for (idx, candidate) in remaining.iter().enumerate() {
            let diversity = diversity_score(&candidate.phrase, selected.iter().map(|s| s.phrase.as_str()));
            let total = weights.score(candidate.similarity, diversity);

            if best.is_none_or(|(_, best_total, _)| total > best_total) {
                best = Some((idx, total, diversity));
            }
        }

        let Some((idx, total, diversity)) = best else { break };
        let chosen = remaining.remove(idx);
        debug!(
            "MMR pick #{}: '{}' (similarity={:.4}, diversity={:.4}, score={:.4})",
            selected.len() + 1,
            chosen.phrase,
            chosen.similarity,
            diversity,
            total
        );
        selected.push(SelectedPhrase::from_scored(chosen, Some(diversity)));
    }

    selected
}
