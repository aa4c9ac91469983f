

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::try_join;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::{MmrWeights, PhraseRequest};
use super::models::{GenerationStats, PhraseSelection, PoolKind, ScoredPhrase};
use super::phases::{filter_relevant, generate_combinations, rank_candidates, select_diverse, sort_by_similarity};
use super::pool::{FileWordPool, WordPoolSource};
use crate::core::config::ChinghoConfig;
use crate::core::error::{PhraseError, Result};
use crate::llm::embeddings::{Embedder, EmbeddingError};
use crate::llm::factory::EmbedderFactory;
use crate::utils::{normalize_text, safe_truncate_ellipsis};

/// Runs embed → filter → combine → rank → diversify for one source text.
///
/// Holds no per-request state; every call reloads the pools and starts from scratch.
pub struct PhraseGenerator {
    embedder: Arc<dyn Embedder>,
    pools: Arc<dyn WordPoolSource>,
    weights: MmrWeights,
    top_similar_count: usize,
}

impl PhraseGenerator {
    pub fn new(embedder: Arc<dyn Embedder>, pools: Arc<dyn WordPoolSource>) -> Self {
        Self {
            embedder,
            pools,
            weights: MmrWeights::default(),
            top_similar_count: 5,
        }
    }


    pub fn from_config(config: &ChinghoConfig) -> Result<Self> {
        config.validate()?;
        let embedder = EmbedderFactory::from_config(config)?;
        let pools = Arc::new(FileWordPool::new(config.word_pool_dirs.clone()));

        Ok(Self::new(embedder, pools)
            .with_weights(config.mmr_weights())
            .with_top_similar(config.top_similar_count))
    }

    #[must_use]
    pub fn with_weights(mut self, weights: MmrWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Number of raw best matches reported as a diagnostic; `0` turns it off.
    #[must_use]
    pub fn with_top_similar(mut self, count: usize) -> Self {
        self.top_similar_count = count;
        self
    }

    pub fn weights(&self) -> &MmrWeights {
        &self.weights
    }


    pub async fn generate_phrases(&self, request: &PhraseRequest) -> Result<PhraseSelection> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        request.validate()?;
        let source_text = normalize_text(&request.source_text);

        info!(
            "[{}] Generating phrases: top_k={}, adj_filter={}, noun_filter={}, text='{}'",
            request_id,
            request.top_k,
            request.adj_filter_count,
            request.noun_filter_count,
            safe_truncate_ellipsis(&source_text, 40)
        );

        // A rejected source text is the caller's fault; rejected pool words are not.
        let target = self.embedder.embed(&source_text).await.map_err(|e| match e {
            EmbeddingError::InvalidInput(message) => PhraseError::Input(message),
            other => other.into(),
        })?;
        debug!("[{}] Source embedded: dims={}", request_id, target.len());

        let pools = Arc::clone(&self.pools);
        let (adjective_pool, noun_pool) =
            tokio::task::spawn_blocking(move || (pools.load(PoolKind::Adjectives), pools.load(PoolKind::Nouns)))
                .await
                .map_err(|e| PhraseError::Io(std::io::Error::other(e)))?;

        let (adjectives, nouns) = try_join(
            filter_relevant(self.embedder.as_ref(), &adjective_pool.words, &target, request.adj_filter_count),
            filter_relevant(self.embedder.as_ref(), &noun_pool.words, &target, request.noun_filter_count),
        )
        .await?;

        let combinations = generate_combinations(&adjectives, &nouns);
        let total_generated = combinations.len();
        debug!(
            "[{}] Combinations: {} adjectives x {} nouns = {}",
            request_id,
            adjectives.len(),
            nouns.len(),
            total_generated
        );

        let mut ranked = rank_candidates(self.embedder.as_ref(), combinations, &target).await?;
        sort_by_similarity(&mut ranked);

        let phrases = select_diverse(&ranked, request.top_k, &self.weights);
        let top_similar = self.top_similar(&ranked);

        let processing_time = started.elapsed().as_secs_f64();
        info!(
            "[{}] Selected {:?} from {} candidates in {:.3}s",
            request_id,
            phrases.iter().map(|p| p.phrase.as_str()).collect::<Vec<_>>(),
            total_generated,
            processing_time
        );

        Ok(PhraseSelection {
            request_id,
            generated_at: Utc::now(),
            phrases,
            stats: GenerationStats {
                total_generated,
                filtered_adjectives: adjectives.len(),
                filtered_nouns: nouns.len(),
                processing_time,
                adjective_pool: adjective_pool.origin,
                noun_pool: noun_pool.origin,
                embedder: self.embedder.name().to_string(),
            },
            top_similar,
        })
    }

    fn top_similar(&self, ranked: &[ScoredPhrase]) -> Option<Vec<ScoredPhrase>> {
        if self.top_similar_count == 0 {
            return None;
        }
        Some(ranked.iter().take(self.top_similar_count).cloned().collect())
    }
}
