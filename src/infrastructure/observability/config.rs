//! Observability settings for the translation service
//!
//! Spans from `/translate` can be exported over OTLP. Cache hit/miss and
//! backend counters are served in Prometheus text format.

use serde::Deserialize;

/// Service name reported on exported spans
pub const DEFAULT_SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// `[observability]` section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// `[observability.tracing]`: OTLP span export, off unless a collector is configured
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    /// gRPC collector endpoint
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Fraction of translation requests whose spans are exported
    pub sampling_ratio: f64,
}

/// `[observability.metrics]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route of the scrape endpoint, merged into the main router
    pub path: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Reject settings that would break span export or shadow the API routes
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.tracing.sampling_ratio) {
            return Err(format!(
                "tracing.sampling_ratio must be within [0, 1], got {}",
                self.tracing.sampling_ratio
            ));
        }

        if self.tracing.enabled && self.tracing.otlp_endpoint.is_empty() {
            return Err("tracing.otlp_endpoint is required when tracing is enabled".to_string());
        }

        if self.metrics.enabled {
            let path = self.metrics.path.as_str();

            if !path.starts_with('/') || path == "/" {
                return Err(format!("metrics.path must be a sub-path like /metrics, got {path:?}"));
            }

            if ["/translate", "/health", "/ready", "/live"].contains(&path) {
                return Err(format!("metrics.path {path} collides with an API route"));
            }
        }

        Ok(())
    }
}
