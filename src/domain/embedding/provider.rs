//! Embedding provider trait definition

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::Embedding;
use crate::domain::DomainError;

/// Maps a sentence to a fixed-length vector.
///
/// Implementations fail with [`DomainError::EmbeddingUnavailable`] when the
/// backend is unreachable, answers with a non-success status or returns a
/// malformed vector. They never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;
}
