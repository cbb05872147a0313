//! Observability infrastructure - Metrics and telemetry configuration

mod config;
mod metrics;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_backend_request, record_cache_lookup,
    record_cache_write_failure, record_http_request, Backend, PrometheusMetrics,
};
