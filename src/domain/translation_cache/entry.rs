//! Cache entry types

use crate::domain::embedding::Embedding;
use crate::domain::translation::LanguagePair;

/// A persisted translation keyed by language pair and embedding
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    languages: LanguagePair,
    embedding: Embedding,
    source_text: String,
    target_text: String,
}

impl CacheEntry {
    /// Create a new cache entry
    pub fn new(
        languages: LanguagePair,
        embedding: Embedding,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
    ) -> Self {
        Self {
            languages,
            embedding,
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn source_language(&self) -> &str {
        self.languages.source()
    }

    pub fn target_language(&self) -> &str {
        self.languages.target()
    }

    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }
}

/// A successful cache lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    /// The stored translation
    pub target_text: String,
    /// Cosine distance between the stored and the query embedding
    pub distance: f64,
}

impl CacheHit {
    pub fn new(target_text: impl Into<String>, distance: f64) -> Self {
        Self {
            target_text: target_text.into(),
            distance,
        }
    }
}
