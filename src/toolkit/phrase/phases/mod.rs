

pub mod filter;
pub mod combine;
pub mod rank;
pub mod diversity;

pub use filter::filter_relevant;
pub use combine::generate_combinations;
pub use rank::{rank_candidates, sort_by_similarity};
pub use diversity::{diversity_score, jaccard_similarity, select_diverse};

use crate::core::error::{PhraseError, Result};
use crate::llm::embeddings::EmbeddingError;

/// Rejects a batch that does not hold one `dimension`-long vector per input.
pub(crate) fn check_vectors(inputs: usize, dimension: usize, vectors: &[Vec<f32>]) -> Result<()> {
    if vectors.len() != inputs {
        return Err(EmbeddingError::LengthMismatch {
            expected: inputs,
            actual: vectors.len(),
        }
        .into());
    }

    if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(PhraseError::DimensionMismatch {
            expected: dimension,
            actual: bad.len(),
        });
    }
    Ok(())
}
