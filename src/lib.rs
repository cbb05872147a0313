//! Semantic Translation Cache
//!
//! An HTTP translation service that sits in front of an external translator
//! and reuses earlier translations of semantically similar sentences:
//! - Sentence splitting and reassembly
//! - Embedding-based similarity lookup in Postgres/pgvector
//! - Write-back of fresh translations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use api::state::AppState;
use config::DatabaseConfig;
use domain::translation_cache::{CacheBackend, TranslationCache};
use infrastructure::{
    embedding::HttpEmbeddingProvider,
    http_client::HttpClient,
    services::TranslationService,
    translation::HttpTranslationProvider,
    translation_cache::{InMemoryTranslationCache, PgvectorCacheConfig, PgvectorTranslationCache},
};

/// Application state plus the resources that must be released on shutdown
pub struct AppResources {
    pub state: AppState,
    pub pool: Option<PgPool>,
}

impl AppResources {
    /// Close the connection pool, waiting for checked-out connections
    pub async fn shutdown(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

/// Create the application state with all services initialized
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppResources> {
    config.validate()?;

    let (cache, pool) = create_cache(config).await?;
    let service = create_translation_service(config, cache.clone())?;

    info!(
        backend = ?config.cache.backend,
        threshold = config.cache.similarity_threshold,
        dimensions = config.cache.dimensions,
        "Translation service initialized"
    );

    Ok(AppResources {
        state: AppState::new(Arc::new(service), cache),
        pool,
    })
}

/// Wire the HTTP backends and the cache into the orchestrator
pub fn create_translation_service(
    config: &AppConfig,
    cache: Arc<dyn TranslationCache>,
) -> anyhow::Result<TranslationService> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.services.timeout_secs))?;

    let embedding_provider = HttpEmbeddingProvider::new(
        client.clone(),
        &config.services.embedding_url,
    )
    .with_dimensions(config.cache.dimensions);
    let translation_provider = HttpTranslationProvider::new(client, &config.services.translate_url);

    Ok(TranslationService::with_config(
        Arc::new(embedding_provider),
        Arc::new(translation_provider),
        cache,
        config.cache.clone(),
    ))
}

async fn create_cache(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn TranslationCache>, Option<PgPool>)> {
    match config.cache.backend {
        CacheBackend::Memory => {
            info!("Using in-memory translation cache; entries are lost on restart");
            let cache = InMemoryTranslationCache::new().with_dimensions(config.cache.dimensions);

            Ok((Arc::new(cache), None))
        }
        CacheBackend::Postgres => {
            let pool = connect_pool(&config.database).await?;
            let cache = create_pgvector_cache(pool.clone(), config);
            cache.ensure_table().await?;

            Ok((Arc::new(cache), Some(pool)))
        }
    }
}

pub fn create_pgvector_cache(pool: PgPool, config: &AppConfig) -> PgvectorTranslationCache {
    PgvectorTranslationCache::new(pool, PgvectorCacheConfig::new(config.cache.dimensions))
}

/// Open the shared Postgres pool
pub async fn connect_pool(database: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .acquire_timeout(Duration::from_secs(database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
        .connect(&database.url)
        .await
        .context("Failed to connect to Postgres")?;

    info!(
        max_connections = database.max_connections,
        "Connected to Postgres"
    );

    Ok(pool)
}
