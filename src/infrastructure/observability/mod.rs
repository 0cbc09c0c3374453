//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, query_outcome, record_guardrail_decision,
    record_ingestion_flush, record_query, PrometheusMetrics,
};
