

pub mod config;
pub mod error;

pub use config::ChinghoConfig;
pub use error::{PhraseError, Result};
