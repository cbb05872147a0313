//! Translation cache trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{CacheEntry, CacheHit};
use crate::domain::embedding::Embedding;
use crate::domain::translation::LanguagePair;
use crate::domain::DomainError;

/// Persistent store of translations queried by embedding similarity
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationCache: Send + Sync {
    /// Find the nearest entry for the language pair whose cosine distance to
    /// `embedding` is at most `threshold` (inclusive).
    ///
    /// `Ok(None)` means nothing was close enough; it is not an error.
    /// Entries stored under another language pair never match.
    async fn lookup(
        &self,
        languages: &LanguagePair,
        embedding: &Embedding,
        threshold: f64,
    ) -> Result<Option<CacheHit>, DomainError>;

    /// Append a new entry. Existing entries are never overwritten.
    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
