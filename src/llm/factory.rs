

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::info;

use super::cache::CachedEmbedder;
use super::embeddings::{Embedder, HttpEmbedder};
use crate::core::config::ChinghoConfig;
use crate::core::error::Result;


pub struct EmbedderFactory;

impl EmbedderFactory {

    pub fn http_from_config(config: &ChinghoConfig) -> Result<HttpEmbedder> {
        Ok(HttpEmbedder::new(
            config.embedding_url.clone(),
            config.embedding_model.clone(),
            config.timeout,
            config.max_retries,
        )?)
    }

    /// HTTP embedder, wrapped in the text-keyed cache when the config enables it.
    pub fn from_config(config: &ChinghoConfig) -> Result<Arc<dyn Embedder>> {
        let http = Self::http_from_config(config)?;

        match NonZeroUsize::new(config.embedding_cache_size) {
            Some(capacity) if config.embedding_cache_enabled => {
                info!(
                    "Embedding cache enabled: size={}, ttl={}s",
                    capacity, config.embedding_cache_ttl
                );
                Ok(Arc::new(CachedEmbedder::new(http, capacity, config.embedding_cache_ttl)))
            }
            _ => Ok(Arc::new(http)),
        }
    }
}
