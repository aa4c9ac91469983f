use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use super::embeddings::{Embedder, EmbeddingError};

/// Embedder decorator that remembers vectors by exact text.
///
/// Blank texts are never cached. Entries expire after the TTL.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<LruCache<String, (Vec<f32>, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl<E: Embedder> CachedEmbedder<E> {
    pub fn new(inner: E, capacity: NonZeroUsize, ttl_secs: u64) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn make_key(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn get(&self, text: &str) -> Option<Vec<f32>> {
        let key = Self::make_key(text);
        let mut cache = self.cache.lock();
        let fresh = match cache.get(&key) {
            Some((vector, created_at)) if created_at.elapsed() < self.ttl => Some(vector.clone()),
            Some(_) => {
                cache.pop(&key);
                None
            }
            None => None,
        };
        drop(cache);

        if fresh.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    fn set(&self, text: &str, vector: &[f32]) {
        if text.trim().is_empty() {
            return;
        }
        self.cache
            .lock()
            .put(Self::make_key(text), (vector.to_vec(), Instant::now()));
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.cache.lock().len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl<E: Embedder> Embedder for CachedEmbedder<E> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(cached) = self.get(text) {
            debug!("Embedding cache HIT for: {}", crate::safe_truncate_ellipsis(text, 30));
            return Ok(cached);
        }

        let vector = self.inner.embed(text).await?;
        self.set(text, &vector);
        Ok(vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut slots: Vec<Option<Vec<f32>>> = texts.iter().map(|t| self.get(t)).collect();
        let missing: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        debug!(
            "Embedding cache batch: total={}, hits={}, misses={}",
            texts.len(),
            texts.len() - missing.len(),
            missing.len()
        );

        if !missing.is_empty() {
            let to_embed: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let vectors = self.inner.embed_batch(&to_embed).await?;
            if vectors.len() != to_embed.len() {
                return Err(EmbeddingError::LengthMismatch {
                    expected: to_embed.len(),
                    actual: vectors.len(),
                });
            }

            for (&i, vector) in missing.iter().zip(vectors) {
                self.set(&texts[i], &vector);
                slots[i] = Some(vector);
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
