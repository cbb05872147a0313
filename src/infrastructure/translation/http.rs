//! HTTP JSON translation provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::translation::{LanguagePair, TranslationProvider};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Translation provider backed by a plain HTTP JSON endpoint
///
/// Request: `{"text", "source_language", "target_language"}`.
/// Response: `{"translation": "..."}`.
#[derive(Debug)]
pub struct HttpTranslationProvider<C: HttpClientTrait> {
    client: C,
    url: String,
}

impl<C: HttpClientTrait> HttpTranslationProvider<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> TranslationProvider for HttpTranslationProvider<C> {
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String, DomainError> {
        let body = serde_json::json!({
            "text": text,
            "source_language": languages.source(),
            "target_language": languages.target(),
        });

        let response = self
            .client
            .post_json(&self.url, &body)
            .await
            .map_err(|e| DomainError::translation_unavailable(e.to_string()))?;

        let response: HttpTranslationResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::translation_unavailable(format!(
                "Failed to parse translation response: {}",
                e
            ))
        })?;

        Ok(response.translation)
    }
}

#[derive(Debug, Deserialize)]
struct HttpTranslationResponse {
    translation: String,
}
