//! Translation cache implementations

mod in_memory;
mod pgvector;

pub use in_memory::InMemoryTranslationCache;
pub use pgvector::{PgvectorCacheConfig, PgvectorTranslationCache, DEFAULT_TABLE_NAME};
