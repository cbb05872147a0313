//! Semantic translation cache domain models and traits
//!
//! Provides vector-based lookup of previously computed translations, keyed by
//! language pair and embedding similarity rather than exact text.

mod config;
mod entry;
mod repository;

pub use config::{CacheBackend, TranslationCacheConfig, WriteFailurePolicy};
pub use entry::{CacheEntry, CacheHit};
pub use repository::TranslationCache;

#[cfg(test)]
pub use repository::MockTranslationCache;
