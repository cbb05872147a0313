//! In-memory translation cache implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::embedding::Embedding;
use crate::domain::translation::LanguagePair;
use crate::domain::translation_cache::{CacheEntry, CacheHit, TranslationCache};
use crate::domain::DomainError;

/// In-memory translation cache using linear search
///
/// Suitable for development and tests. Entries live as long as the process.
/// Matches the pgvector tie-break: nearest entry wins, then the oldest.
#[derive(Debug, Default)]
pub struct InMemoryTranslationCache {
    entries: RwLock<Vec<CacheEntry>>,
    dimensions: Option<usize>,
}

impl InMemoryTranslationCache {
    /// Create a new, empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject embeddings whose length differs from `dimensions`
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all stored entries in insertion order
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.entries.read().map(|e| e.clone()).unwrap_or_default()
    }

    fn check_dimensions(&self, embedding: &Embedding) -> Result<(), String> {
        match self.dimensions {
            Some(expected) if embedding.dimensions() != expected => Err(format!(
                "Embedding has {} dimensions, cache expects {}",
                embedding.dimensions(),
                expected
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TranslationCache for InMemoryTranslationCache {
    async fn lookup(
        &self,
        languages: &LanguagePair,
        embedding: &Embedding,
        threshold: f64,
    ) -> Result<Option<CacheHit>, DomainError> {
        self.check_dimensions(embedding)
            .map_err(DomainError::store_read)?;

        let entries = self.entries.read().map_err(|e| {
            DomainError::store_read(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut best: Option<(&CacheEntry, f64)> = None;

        for entry in entries.iter().filter(|e| e.languages() == languages) {
            let distance = entry.embedding().cosine_distance(embedding);

            if distance > threshold {
                continue;
            }

            // Strict comparison keeps the earliest entry on ties
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((entry, distance)),
            }
        }

        Ok(best.map(|(entry, distance)| CacheHit::new(entry.target_text(), distance)))
    }

    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError> {
        self.check_dimensions(entry.embedding())
            .map_err(DomainError::store_write)?;

        let mut entries = self.entries.write().map_err(|e| {
            DomainError::store_write(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.push(entry);

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
