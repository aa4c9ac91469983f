

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{PhraseError, Result};
use crate::toolkit::phrase::config::{DEFAULT_DIVERSITY_WEIGHT, DEFAULT_RELEVANCE_WEIGHT};
use crate::toolkit::phrase::MmrWeights;
use crate::{
    DEFAULT_ADJ_FILTER_COUNT, DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_EMBEDDING_URL, DEFAULT_NOUN_FILTER_COUNT, DEFAULT_TOP_K,
};

const ENV_PREFIX: &str = "CHINGHO";


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChinghoConfig {

    pub embedding_url: String,
    pub embedding_model: String,
    pub timeout: u64,
    pub max_retries: u32,


    pub embedding_cache_enabled: bool,
    pub embedding_cache_size: usize,
    pub embedding_cache_ttl: u64,


    pub word_pool_dirs: Vec<PathBuf>,


    pub default_top_k: usize,
    pub default_adj_filter_count: usize,
    pub default_noun_filter_count: usize,
    pub relevance_weight: f64,
    pub diversity_weight: f64,
    pub top_similar_count: usize,
}

impl Default for ChinghoConfig {
    fn default() -> Self {
        Self {
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout: 30,
            max_retries: 3,

            embedding_cache_enabled: true,
            embedding_cache_size: DEFAULT_CACHE_SIZE,
            embedding_cache_ttl: DEFAULT_CACHE_TTL,

            word_pool_dirs: vec![PathBuf::from("./data"), PathBuf::from("../../data")],

            default_top_k: DEFAULT_TOP_K,
            default_adj_filter_count: DEFAULT_ADJ_FILTER_COUNT,
            default_noun_filter_count: DEFAULT_NOUN_FILTER_COUNT,
            relevance_weight: DEFAULT_RELEVANCE_WEIGHT,
            diversity_weight: DEFAULT_DIVERSITY_WEIGHT,
            top_similar_count: 5,
        }
    }
}

impl ChinghoConfig {
    /// Layers an optional config file and `CHINGHO_*` environment variables over the defaults.
    ///
    /// `CHINGHO_WORD_POOL_DIRS` takes a comma-separated list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading config file: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("word_pool_dirs"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }


    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }


    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.embedding_url).map_err(|e| {
            PhraseError::Config(format!("invalid embedding_url '{}': {}", self.embedding_url, e))
        })?;

        if self.max_retries == 0 {
            return Err(PhraseError::Config("max_retries must be at least 1".to_string()));
        }
        if self.timeout == 0 {
            return Err(PhraseError::Config("timeout must be at least 1 second".to_string()));
        }
        if self.embedding_cache_enabled && self.embedding_cache_size == 0 {
            return Err(PhraseError::Config(
                "embedding_cache_size must be positive when the cache is enabled".to_string(),
            ));
        }

        MmrWeights::new(self.relevance_weight, self.diversity_weight)?;
        Ok(())
    }


    pub fn mmr_weights(&self) -> MmrWeights {
        MmrWeights {
            relevance: self.relevance_weight,
            diversity: self.diversity_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChinghoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_top_k, 3);
        assert_eq!(config.default_adj_filter_count, 20);
        assert_eq!(config.default_noun_filter_count, 30);
        assert_eq!(config.mmr_weights(), MmrWeights::default());
    }

    #[test]
    fn test_rejects_bad_url() {
        let config = ChinghoConfig {
            embedding_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PhraseError::Config(_))));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = ChinghoConfig {
            diversity_weight: -0.3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_retries() {
        let config = ChinghoConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("chingho-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chingho.toml");
        std::fs::write(
            &path,
            "embedding_url = \"http://ml:9000\"\ndefault_top_k = 5\nrelevance_weight = 0.6\ndiversity_weight = 0.4\n",
        )
        .unwrap();

        let config = ChinghoConfig::load(Some(&path)).unwrap();
        assert_eq!(config.embedding_url, "http://ml:9000");
        assert_eq!(config.default_top_k, 5);
        assert!((config.relevance_weight - 0.6).abs() < 1e-9);
        assert_eq!(config.default_noun_filter_count, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("chingho-does-not-exist.toml");
        let config = ChinghoConfig::load(Some(&path)).unwrap();
        assert_eq!(config.embedding_url, DEFAULT_EMBEDDING_URL);
    }
}
