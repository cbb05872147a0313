//! Translation provider trait definition

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::LanguagePair;
use crate::domain::DomainError;

/// Translates a single sentence between two languages.
///
/// Any transport failure, non-success status or malformed response surfaces
/// as [`DomainError::TranslationUnavailable`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate text for the given language pair
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String, DomainError>;
}
