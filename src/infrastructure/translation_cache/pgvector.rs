//! pgvector translation cache implementation

use std::fmt::Debug;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::{debug, error, warn};

use crate::domain::embedding::Embedding;
use crate::domain::translation::LanguagePair;
use crate::domain::translation_cache::{CacheEntry, CacheHit, TranslationCache};
use crate::domain::DomainError;

/// Table used when none is configured
pub const DEFAULT_TABLE_NAME: &str = "translations_cache";

/// Configuration for the pgvector translation cache
#[derive(Debug, Clone)]
pub struct PgvectorCacheConfig {
    /// Embedding dimensions of the vector column
    pub dimensions: usize,
    /// Table name for storing translations
    pub table_name: String,
}

impl PgvectorCacheConfig {
    /// Create a new configuration for the given dimensions
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    /// Set the table name
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }
}

/// Translation cache stored in Postgres, searched by cosine distance (`<=>`)
pub struct PgvectorTranslationCache {
    pool: PgPool,
    config: PgvectorCacheConfig,
}

impl Debug for PgvectorTranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgvectorTranslationCache")
            .field("config", &self.config)
            .finish()
    }
}

impl PgvectorTranslationCache {
    /// Create a cache on top of a shared connection pool
    pub fn new(pool: PgPool, config: PgvectorCacheConfig) -> Self {
        Self { pool, config }
    }

    /// Ensure the pgvector extension, the table and its indexes exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::store_write(format!("Failed to create vector extension: {}", e))
            })?;

        let table = &self.config.table_name;
        let query = self.create_table_sql();

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store_write(format!("Failed to create table: {}", e)))?;

        let language_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_languages ON {} (source_language, target_language)",
            table, table
        );

        sqlx::query(&language_index)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::store_write(format!("Failed to create language index: {}", e))
            })?;

        let vector_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_embedding ON {} USING hnsw (embedding vector_cosine_ops)",
            table, table
        );

        // Older pgvector releases lack HNSW; sequential scans still work
        if let Err(e) = sqlx::query(&vector_index).execute(&self.pool).await {
            warn!(table = %table, error = %e, "Skipping vector index creation");
        }

        Ok(())
    }

    // Language codes are TEXT; requests only bound them to be non-empty
    fn create_table_sql(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                embedding vector({}) NOT NULL,
                source_text TEXT NOT NULL,
                target_text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.config.table_name, self.config.dimensions
        )
    }

    fn check_dimensions(&self, embedding: &Embedding) -> Result<(), String> {
        if embedding.dimensions() != self.config.dimensions {
            return Err(format!(
                "Embedding has {} dimensions, cache expects {}",
                embedding.dimensions(),
                self.config.dimensions
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl TranslationCache for PgvectorTranslationCache {
    async fn lookup(
        &self,
        languages: &LanguagePair,
        embedding: &Embedding,
        threshold: f64,
    ) -> Result<Option<CacheHit>, DomainError> {
        self.check_dimensions(embedding)
            .map_err(DomainError::store_read)?;

        // Nearest row wins; exact distance ties go to the oldest row
        let query = format!(
            r#"
            SELECT target_text, (embedding <=> $3::vector) AS distance
            FROM {}
            WHERE source_language = $1
              AND target_language = $2
              AND (embedding <=> $3::vector) <= $4
            ORDER BY distance, id
            LIMIT 1
            "#,
            self.config.table_name
        );

        let row = sqlx::query(&query)
            .bind(languages.source())
            .bind(languages.target())
            .bind(embedding.to_pgvector())
            .bind(threshold)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(languages = %languages, error = %e, "Cache lookup failed");
                DomainError::store_read(format!("Lookup failed: {}", e))
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let target_text: String = row
            .try_get("target_text")
            .map_err(|e| DomainError::store_read(format!("Invalid target_text column: {}", e)))?;
        let distance: f64 = row
            .try_get("distance")
            .map_err(|e| DomainError::store_read(format!("Invalid distance column: {}", e)))?;

        debug!(languages = %languages, distance, "Cache row matched");

        Ok(Some(CacheHit::new(target_text, distance)))
    }

    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError> {
        self.check_dimensions(entry.embedding())
            .map_err(DomainError::store_write)?;

        let query = format!(
            r#"
            INSERT INTO {} (source_language, target_language, embedding, source_text, target_text)
            VALUES ($1, $2, $3::vector, $4, $5)
            "#,
            self.config.table_name
        );

        sqlx::query(&query)
            .bind(entry.source_language())
            .bind(entry.target_language())
            .bind(entry.embedding().to_pgvector())
            .bind(entry.source_text())
            .bind(entry.target_text())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(languages = %entry.languages(), error = %e, "Cache insert failed");
                DomainError::store_write(format!("Insert failed: {}", e))
            })?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store_read(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}
