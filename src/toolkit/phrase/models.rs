

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use uuid::Uuid;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PoolKind {
    Adjectives,
    Nouns,
}

impl PoolKind {
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.as_ref())
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "path", rename_all = "snake_case")]
pub enum PoolOrigin {
    File(PathBuf),
    BuiltIn,
    Memory,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    pub kind: PoolKind,
    pub words: Vec<String>,
    pub origin: PoolOrigin,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub similarity: f64,
}

impl ScoredPhrase {
    pub fn new(phrase: impl Into<String>, similarity: f64) -> Self {
        Self {
            phrase: phrase.into(),
            similarity,
        }
    }
}

/// A phrase picked by the diversity selector.
///
/// `diversity` is the lexical-novelty term that won it the slot; it is `None`
/// for the first pick and when no re-ranking was needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPhrase {
    pub phrase: String,
    pub similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity: Option<f64>,
}

impl SelectedPhrase {
    pub fn from_scored(scored: &ScoredPhrase, diversity: Option<f64>) -> Self {
        Self {
            phrase: scored.phrase.clone(),
            similarity: scored.similarity,
            diversity,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total_generated: usize,
    pub filtered_adjectives: usize,
    pub filtered_nouns: usize,
    pub processing_time: f64,
    pub adjective_pool: PoolOrigin,
    pub noun_pool: PoolOrigin,
    pub embedder: String,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseSelection {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub phrases: Vec<SelectedPhrase>,
    pub stats: GenerationStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_similar: Option<Vec<ScoredPhrase>>,
}

impl PhraseSelection {
    pub fn combinations(&self) -> Vec<&str> {
        self.phrases.iter().map(|p| p.phrase.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
