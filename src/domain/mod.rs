//! Domain layer - Core business logic and entities

pub mod embedding;
pub mod error;
pub mod segmentation;
pub mod translation;
pub mod translation_cache;

pub use embedding::{cosine_distance, cosine_similarity, Embedding, EmbeddingProvider};
pub use error::DomainError;
pub use segmentation::{SentenceSplitter, TranslationUnit};
pub use translation::{LanguagePair, TranslationProvider, TranslationRequest};
pub use translation_cache::{
    CacheBackend, CacheEntry, CacheHit, TranslationCache, TranslationCacheConfig,
    WriteFailurePolicy,
};
