//! Translation cache configuration

use serde::{Deserialize, Serialize};

use crate::domain::segmentation::DEFAULT_SENTENCE_DELIMITER;

/// Storage backend for the translation cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Postgres with the pgvector extension
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// What to do when a fresh translation cannot be written back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFailurePolicy {
    /// Fail the whole request
    #[default]
    FailFast,
    /// Log a warning and return the translation anyway
    LogAndContinue,
}

/// Configuration for the semantic translation cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationCacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Maximum cosine distance accepted as a hit (inclusive).
    /// Lower values are stricter.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Embedding dimensions stored in the cache table
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Sentence boundary used for splitting and reassembly
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub write_failure_policy: WriteFailurePolicy,

    /// Number of sentences embedded concurrently within one request
    #[serde(default = "default_embedding_concurrency")]
    pub embedding_concurrency: usize,
}

fn default_similarity_threshold() -> f64 {
    0.1
}

fn default_dimensions() -> usize {
    384
}

fn default_delimiter() -> String {
    DEFAULT_SENTENCE_DELIMITER.to_string()
}

fn default_embedding_concurrency() -> usize {
    1
}

impl Default for TranslationCacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            similarity_threshold: default_similarity_threshold(),
            dimensions: default_dimensions(),
            delimiter: default_delimiter(),
            write_failure_policy: WriteFailurePolicy::default(),
            embedding_concurrency: default_embedding_concurrency(),
        }
    }
}

impl TranslationCacheConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: CacheBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_write_failure_policy(mut self, policy: WriteFailurePolicy) -> Self {
        self.write_failure_policy = policy;
        self
    }

    /// Set embedding concurrency (at least 1)
    pub fn with_embedding_concurrency(mut self, concurrency: usize) -> Self {
        self.embedding_concurrency = concurrency.max(1);
        self
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), String> {
        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            return Err(format!(
                "similarity_threshold must be a non-negative number, got {}",
                self.similarity_threshold
            ));
        }

        if self.dimensions == 0 {
            return Err("dimensions must be greater than zero".to_string());
        }

        if self.delimiter.is_empty() {
            return Err("delimiter must not be empty".to_string());
        }

        if self.embedding_concurrency == 0 {
            return Err("embedding_concurrency must be at least 1".to_string());
        }

        Ok(())
    }
}
