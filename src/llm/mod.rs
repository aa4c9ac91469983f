

pub mod cache;
pub mod embeddings;
pub mod factory;

pub use cache::{CacheStats, CachedEmbedder};
pub use embeddings::{
    Embedder, EmbeddingError, HttpEmbedder, MAX_BATCH_SIZE, ServiceHealth, StaticEmbedder,
};
pub use factory::EmbedderFactory;
