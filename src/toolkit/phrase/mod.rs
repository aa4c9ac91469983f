

pub mod config;
pub mod models;
pub mod similarity;
pub mod pool;
pub mod phases;
pub mod pipeline;


pub use config::{MmrWeights, PhraseRequest};
pub use models::{
    GenerationStats, PhraseSelection, PoolKind, PoolOrigin, ScoredPhrase, SelectedPhrase, WordPool,
};
pub use similarity::{MIN_SIMILARITY, batch_cosine_similarity, cosine_similarity};
pub use pool::{FileWordPool, StaticWordPool, WordPoolSource};
pub use pipeline::PhraseGenerator;
