

use serde::{Deserialize, Serialize};

use crate::core::error::{PhraseError, Result};
use crate::{DEFAULT_ADJ_FILTER_COUNT, DEFAULT_NOUN_FILTER_COUNT, DEFAULT_TOP_K};


pub const DEFAULT_RELEVANCE_WEIGHT: f64 = 0.7;


pub const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.3;


pub const MAX_TOP_K: usize = 50;


pub const MAX_FILTER_COUNT: usize = 100;


pub const MAX_SOURCE_CHARS: usize = 50_000;

/// Relevance/diversity trade-off used by the MMR selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MmrWeights {
    pub relevance: f64,
    pub diversity: f64,
}

impl Default for MmrWeights {
    fn default() -> Self {
        Self {
            relevance: DEFAULT_RELEVANCE_WEIGHT,
            diversity: DEFAULT_DIVERSITY_WEIGHT,
        }
    }
}

impl MmrWeights {
    pub fn new(relevance: f64, diversity: f64) -> Result<Self> {
        for (name, value) in [("relevance", relevance), ("diversity", diversity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhraseError::Config(format!(
                    "{} weight must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(Self { relevance, diversity })
    }


    pub fn score(&self, similarity: f64, diversity: f64) -> f64 {
        similarity * self.relevance + diversity * self.diversity
    }
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseRequest {
    pub source_text: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_adj_filter_count")]
    pub adj_filter_count: usize,
    #[serde(default = "default_noun_filter_count")]
    pub noun_filter_count: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_adj_filter_count() -> usize {
    DEFAULT_ADJ_FILTER_COUNT
}

fn default_noun_filter_count() -> usize {
    DEFAULT_NOUN_FILTER_COUNT
}

impl PhraseRequest {
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            top_k: DEFAULT_TOP_K,
            adj_filter_count: DEFAULT_ADJ_FILTER_COUNT,
            noun_filter_count: DEFAULT_NOUN_FILTER_COUNT,
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub fn with_filter_counts(mut self, adj_filter_count: usize, noun_filter_count: usize) -> Self {
        self.adj_filter_count = adj_filter_count;
        self.noun_filter_count = noun_filter_count;
        self
    }


    pub fn validate(&self) -> Result<()> {
        if self.source_text.trim().is_empty() {
            return Err(PhraseError::input("source_text must not be blank"));
        }

        let chars = self.source_text.chars().count();
        if chars > MAX_SOURCE_CHARS {
            return Err(PhraseError::input(format!(
                "source_text is too long ({} chars, max {})",
                chars, MAX_SOURCE_CHARS
            )));
        }

        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(PhraseError::input(format!(
                "top_k must be between 1 and {} (got {})",
                MAX_TOP_K, self.top_k
            )));
        }

        for (name, value) in [
            ("adj_filter_count", self.adj_filter_count),
            ("noun_filter_count", self.noun_filter_count),
        ] {
            if !(1..=MAX_FILTER_COUNT).contains(&value) {
                return Err(PhraseError::input(format!(
                    "{} must be between 1 and {} (got {})",
                    name, MAX_FILTER_COUNT, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = MmrWeights::default();
        assert!((weights.relevance - 0.7).abs() < f64::EPSILON);
        assert!((weights.diversity - 0.3).abs() < f64::EPSILON);
        assert!((weights.score(0.8, 1.0) - 0.86).abs() < 1e-9);
    }

    #[test]
    fn test_weights_reject_nan() {
        assert!(MmrWeights::new(f64::NAN, 0.3).is_err());
        assert!(MmrWeights::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_request_defaults() {
        let request = PhraseRequest::new("저는 개발자입니다");
        assert_eq!(request.top_k, 3);
        assert_eq!(request.adj_filter_count, 20);
        assert_eq!(request.noun_filter_count, 30);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: PhraseRequest =
            serde_json::from_str(r#"{"source_text":"저는 개발자입니다","top_k":5}"#).unwrap();
        assert_eq!(request.top_k, 5);
        assert_eq!(request.adj_filter_count, 20);
    }

    #[test]
    fn test_request_rejects_blank_text() {
        let err = PhraseRequest::new(" \n\t").validate().unwrap_err();
        assert!(matches!(err, PhraseError::Input(_)));
    }

    #[test]
    fn test_request_rejects_zero_top_k() {
        let err = PhraseRequest::new("텍스트").with_top_k(0).validate().unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_request_rejects_out_of_range_filter_count() {
        let request = PhraseRequest::new("텍스트").with_filter_counts(0, 30);
        assert!(request.validate().is_err());
        let request = PhraseRequest::new("텍스트").with_filter_counts(20, MAX_FILTER_COUNT + 1);
        assert!(request.validate().is_err());
    }
}
