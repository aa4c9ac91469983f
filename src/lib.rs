//! Semantic "adjective + noun" title generation.
//!
//! A source text is embedded, both word pools are narrowed to the words most
//! similar to it, every adjective/noun pair is scored in one batch, and the
//! final titles are picked with a relevance/diversity trade-off.

pub mod core;
pub mod llm;
pub mod toolkit;
pub mod utils;

pub use utils::{normalize_text, safe_truncate_ellipsis};


pub use core::config::ChinghoConfig;
pub use core::error::{PhraseError, Result};
pub use llm::embeddings::{Embedder, EmbeddingError, HttpEmbedder, StaticEmbedder};
pub use toolkit::phrase::{
    MmrWeights, PhraseGenerator, PhraseRequest, PhraseSelection, PoolKind, ScoredPhrase,
    SelectedPhrase, WordPoolSource,
};


pub const DEFAULT_EMBEDDING_URL: &str = "http://localhost:8001";


pub const DEFAULT_EMBEDDING_MODEL: &str = "BM-K/KoSimCSE-bert";


pub const DEFAULT_EMBEDDING_DIMENSION: usize = 768;


pub const DEFAULT_CACHE_SIZE: usize = 1000;


pub const DEFAULT_CACHE_TTL: u64 = 300;


pub const DEFAULT_TOP_K: usize = 3;


pub const DEFAULT_ADJ_FILTER_COUNT: usize = 20;


pub const DEFAULT_NOUN_FILTER_COUNT: usize = 30;
