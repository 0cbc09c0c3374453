//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::guardrail::GuardrailStage;
use crate::domain::{DomainError, GenerationMode};

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_default_metrics();

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

fn register_default_metrics() {
    gauge!("rag_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Create the metrics router, served at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Outcome label for a finished query
pub fn query_outcome(result: &Result<String, DomainError>) -> &'static str {
    match result {
        Ok(_) => "answered",
        Err(DomainError::PolicyRejection { .. }) => "refused",
        Err(DomainError::Timeout { .. }) => "timeout",
        Err(_) => "error",
    }
}

/// Record a finished query
pub fn record_query(mode: GenerationMode, outcome: &'static str, duration: Duration) {
    let labels = [("mode", mode.as_str()), ("outcome", outcome)];

    counter!("rag_queries_total", &labels).increment(1);
    histogram!("rag_query_duration_seconds", "mode" => mode.as_str())
        .record(duration.as_secs_f64());
}

/// Record one guardrail decision
pub fn record_guardrail_decision(stage: GuardrailStage, allowed: bool) {
    let decision = if allowed { "allow" } else { "block" };

    counter!(
        "rag_guardrail_decisions_total",
        "stage" => stage.as_str(),
        "decision" => decision
    )
    .increment(1);
}

/// Record one ingestion flush and the chunks it stored
pub fn record_ingestion_flush(chunks: usize) {
    counter!("rag_ingestion_flushes_total").increment(1);
    counter!("rag_ingested_chunks_total").increment(chunks as u64);
}
