//! Migrate command - prepares the Postgres cache table

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::{init_logging, shutdown_logging};
use crate::{connect_pool, create_pgvector_cache};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging, &config.observability.tracing);

    if config.database.url.is_empty() {
        anyhow::bail!("database.url (DATABASE_URL) is required for migrate");
    }

    let pool = connect_pool(&config.database).await?;
    create_pgvector_cache(pool.clone(), &config)
        .ensure_table()
        .await?;
    pool.close().await;

    info!(dimensions = config.cache.dimensions, "Cache table is ready");
    shutdown_logging();

    Ok(())
}
