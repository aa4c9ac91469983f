

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Largest phrase list the embedding service accepts in one request.
pub const MAX_BATCH_SIZE: usize = 1000;


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,

    #[error("Rejected input: {0}")]
    InvalidInput(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("Expected {expected} vectors, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Text-to-vector capability the phrase pipeline depends on.
///
/// `embed_batch` is atomic: it returns one vector per input, in input order, or fails.
#[async_trait]
pub trait Embedder: Send + Sync {

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;


    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;


    fn name(&self) -> &str;
}


#[async_trait]
impl Embedder for Arc<dyn Embedder> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}


#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    vector: Vec<f32>,
}

#[derive(Serialize)]
struct BatchEmbeddingRequest<'a> {
    phrases: &'a [String],
}

#[derive(Deserialize)]
struct BatchEmbeddingResponse {
    results: Vec<PhraseEmbedding>,
}

#[derive(Deserialize)]
struct PhraseEmbedding {
    vector: Vec<f32>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceHealth {
    pub status: String,
    pub model_loaded: bool,
    pub model_name: String,
    pub embedding_dimension: usize,
}


/// Client for the sentence-embedding micro-service (`/embed`, `/embed/phrases`, `/health`).
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpEmbedder {

    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Result<Self, EmbeddingError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        info!(
            "HttpEmbedder initialized: url={}, model={}, retries={}",
            base_url, model, max_retries
        );

        Ok(Self {
            base_url,
            model,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?,
            max_retries: max_retries.max(1),
            retry_backoff: Duration::from_secs(1),
        })
    }

    /// Base delay between attempts; attempt `n` waits `n * backoff`.
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }


    pub fn model(&self) -> &str {
        &self.model
    }


    pub async fn health_check(&self) -> Result<ServiceHealth, EmbeddingError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ModelUnavailable(format!("{}: {}", status, body)));
        }

        let health = response.json::<ServiceHealth>().await?;
        if !health.model_loaded {
            return Err(EmbeddingError::ModelUnavailable(format!(
                "model {} is not loaded",
                health.model_name
            )));
        }
        Ok(health)
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, EmbeddingError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                debug!("Retrying embedding request: endpoint={}, attempt={}", endpoint, attempt + 1);
                tokio::time::sleep(self.retry_backoff * attempt).await;
            }

            let response = match self.client.post(&url).json(body).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Embedding request to {} failed: {}", endpoint, e);
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let bytes = response.bytes().await?;
                return Ok(serde_json::from_slice(&bytes)?);
            }

            let detail = response.text().await.unwrap_or_default();

            if status == StatusCode::BAD_REQUEST {
                return Err(EmbeddingError::InvalidInput(detail));
            }
            if status.is_client_error() {
                return Err(EmbeddingError::Status { status: status.as_u16(), body: detail });
            }

            warn!("Embedding service error on {}: {}", endpoint, status);
            last_error = Some(if status == StatusCode::SERVICE_UNAVAILABLE {
                EmbeddingError::ModelUnavailable(detail)
            } else {
                EmbeddingError::Status { status: status.as_u16(), body: detail }
            });
        }

        Err(match last_error {
            Some(EmbeddingError::ModelUnavailable(detail)) => EmbeddingError::ModelUnavailable(detail),
            Some(e) => EmbeddingError::RetriesExhausted {
                attempts: self.max_retries,
                last: e.to_string(),
            },
            None => EmbeddingError::RetriesExhausted {
                attempts: self.max_retries,
                last: "no attempt was made".to_string(),
            },
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let response: EmbeddingResponse = self.post_json("/embed", &EmbeddingRequest { text }).await?;

        debug!(
            "Embedding generated: text_chars={}, dims={}",
            text.chars().count(),
            response.vector.len()
        );
        Ok(response.vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH_SIZE) {
            let response: BatchEmbeddingResponse = self
                .post_json("/embed/phrases", &BatchEmbeddingRequest { phrases: chunk })
                .await?;

            if response.results.len() != chunk.len() {
                return Err(EmbeddingError::LengthMismatch {
                    expected: chunk.len(),
                    actual: response.results.len(),
                });
            }
            vectors.extend(response.results.into_iter().map(|r| r.vector));
        }

        debug!("Batch embedding generated: inputs={}, outputs={}", texts.len(), vectors.len());
        Ok(vectors)
    }

    fn name(&self) -> &str {
        "http"
    }
}


/// Lookup-table embedder: every text it can embed is registered up front.
///
/// Blank entries of a batch map to a zero vector, like the embedding service does.
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
    unavailable: AtomicBool,
    single_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimension,
            unavailable: AtomicBool::new(false),
            single_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.insert(text, vector);
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(text.into(), vector);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InvalidResponse(format!("no vector registered for '{}'", text)))
    }

    fn check_available(&self) -> Result<(), EmbeddingError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(EmbeddingError::ModelUnavailable("static embedder disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }
        self.lookup(text)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        texts
            .iter()
            .map(|text| {
                if text.trim().is_empty() {
                    Ok(vec![0.0; self.dimension])
                } else {
                    self.lookup(text)
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "static"
    }
}
