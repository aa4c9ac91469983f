

use thiserror::Error;

use crate::llm::embeddings::EmbeddingError;


#[derive(Error, Debug)]
pub enum PhraseError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Embedding collaborator unavailable: {0}")]
    EmbedderUnavailable(EmbeddingError),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhraseError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// True when the failure came from the embedding backend rather than the caller.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::EmbedderUnavailable(_) | Self::DimensionMismatch { .. })
    }
}

impl From<EmbeddingError> for PhraseError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::EmptyText => Self::Input("source text is empty".to_string()),
            other => Self::EmbedderUnavailable(other),
        }
    }
}

impl From<config::ConfigError> for PhraseError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, PhraseError>;
