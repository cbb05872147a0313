//! Embedding provider implementations

mod http;

pub use http::HttpEmbeddingProvider;
