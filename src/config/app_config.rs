use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::translation_cache::{CacheBackend, TranslationCacheConfig};
use crate::domain::DomainError;
use crate::infrastructure::http_client::DEFAULT_TIMEOUT;
use crate::infrastructure::observability::ObservabilityConfig;

/// Plain environment variables accepted on top of the `APP__*` namespace
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("EMBEDDING_URL", "services.embedding_url"),
    ("TRANSLATE_URL", "services.translate_url"),
    ("DATABASE_URL", "database.url"),
    ("PORT", "server.port"),
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: TranslationCacheConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Endpoints of the embedding and translation backends
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub embedding_url: String,
    pub translate_url: String,
    /// Per-request timeout for both backends
    pub timeout_secs: u64,
}

/// Postgres connection pool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            embedding_url: String::new(),
            translate_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder, |name| std::env::var(name).ok())
    }

    fn from_builder(
        mut builder: ConfigBuilder<DefaultState>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env(var).filter(|v| !v.is_empty()))?;
        }

        builder.build()?.try_deserialize()
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.services.embedding_url.is_empty() {
            return Err(DomainError::configuration(
                "services.embedding_url (EMBEDDING_URL) is required",
            ));
        }

        if self.services.translate_url.is_empty() {
            return Err(DomainError::configuration(
                "services.translate_url (TRANSLATE_URL) is required",
            ));
        }

        if self.services.timeout_secs == 0 {
            return Err(DomainError::configuration(
                "services.timeout_secs must be greater than zero",
            ));
        }

        if self.cache.backend == CacheBackend::Postgres && self.database.url.is_empty() {
            return Err(DomainError::configuration(
                "database.url (DATABASE_URL) is required for the postgres backend",
            ));
        }

        self.observability
            .validate()
            .map_err(|e| DomainError::configuration(format!("observability: {}", e)))?;

        self.cache
            .validate()
            .map_err(|e| DomainError::configuration(format!("cache: {}", e)))
    }
}
