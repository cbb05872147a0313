//! HTTP JSON embedding provider
//!
//! Talks to an embedding service exposing `POST {"text": ...}` and answering
//! `{"embedding": [f32, ...]}`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::embedding::{Embedding, EmbeddingProvider};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Embedding provider backed by a plain HTTP JSON endpoint
#[derive(Debug)]
pub struct HttpEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    url: String,
    dimensions: Option<usize>,
}

impl<C: HttpClientTrait> HttpEmbeddingProvider<C> {
    /// Create a new provider for the given endpoint URL
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            dimensions: None,
        }
    }

    /// Reject vectors whose length differs from `dimensions`
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Embedding, DomainError> {
        let response: HttpEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::embedding_unavailable(format!("Failed to parse embedding response: {}", e))
        })?;

        let embedding = Embedding::new(response.embedding);

        if embedding.dimensions() == 0 {
            return Err(DomainError::embedding_unavailable(
                "Embedding service returned an empty vector",
            ));
        }

        if let Some(expected) = self.dimensions {
            if embedding.dimensions() != expected {
                return Err(DomainError::embedding_unavailable(format!(
                    "Expected {} dimensions, got {}",
                    expected,
                    embedding.dimensions()
                )));
            }
        }

        if !embedding.is_finite() {
            return Err(DomainError::embedding_unavailable(
                "Embedding contains non-finite values",
            ));
        }

        Ok(embedding)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for HttpEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let body = serde_json::json!({ "text": text });

        let response = self
            .client
            .post_json(&self.url, &body)
            .await
            .map_err(|e| DomainError::embedding_unavailable(e.to_string()))?;

        let embedding = self.parse_response(response)?;

        debug!(dimensions = embedding.dimensions(), "Generated embedding");

        Ok(embedding)
    }
}

#[derive(Debug, Deserialize)]
struct HttpEmbeddingResponse {
    embedding: Vec<f32>,
}
