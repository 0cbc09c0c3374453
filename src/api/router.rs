use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::query;
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Router with the query and health endpoints, plus the Prometheus
/// endpoint at `metrics_path` when metrics are installed
pub fn create_router(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/query", post(query::plain_query))
        .route("/ragquery", post(query::rag_query))
        .route("/fullquery", post(query::full_query))
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics, metrics_path));
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::mock::test_state;
    use crate::api::types::SERVICE_APOLOGY;
    use crate::domain::guardrail::MockGuardrail;
    use crate::domain::knowledge_base::{KnowledgeItem, MockVectorStore};
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::GuardrailStage;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router(
        provider: MockLlmProvider,
        guardrail: MockGuardrail,
        store: MockVectorStore,
    ) -> Router {
        let state = test_state(
            Arc::new(provider),
            Arc::new(guardrail),
            Arc::new(store),
            Duration::from_secs(5),
        );
        create_router(state, None, "/metrics")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_query_returns_plain_text_answer() {
        let app = router(
            MockLlmProvider::new("mock").with_reply("<think>hmm</think>Hello!"),
            MockGuardrail::new(),
            MockVectorStore::new(),
        );

        let response = app
            .oneshot(post_json("/query", r#"{"query": "Say hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_text(response).await, "Hello!");
    }

    #[tokio::test]
    async fn test_ragquery_accepts_capitalized_field() {
        let store = MockVectorStore::new().with_result(
            0.9,
            KnowledgeItem::new(vec![0.1; 4], "guide.txt", "Rust 1.0 shipped in 2015."),
        );
        let app = router(
            MockLlmProvider::new("mock").with_reply("In 2015."),
            MockGuardrail::new(),
            store,
        );

        let response = app
            .oneshot(post_json("/ragquery", r#"{"Query": "When did Rust 1.0 ship?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "In 2015.");
    }

    #[tokio::test]
    async fn test_fullquery_refusal_is_422() {
        let app = router(
            MockLlmProvider::new("mock").with_reply("never sent"),
            MockGuardrail::new().blocking(GuardrailStage::Request),
            MockVectorStore::new(),
        );

        let response = app
            .oneshot(post_json("/fullquery", r#"{"query": "something harmful"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            json["error"]["message"],
            GuardrailStage::Request.refusal_message()
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_503_with_apology() {
        let app = router(
            MockLlmProvider::new("mock").with_reply("ok"),
            MockGuardrail::new(),
            MockVectorStore::new().with_error("qdrant down"),
        );

        let response = app
            .oneshot(post_json("/ragquery", r#"{"query": "anything"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let text = body_text(response).await;
        assert!(text.contains(SERVICE_APOLOGY));
        assert!(!text.contains("qdrant down"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let app = router(
            MockLlmProvider::new("mock"),
            MockGuardrail::new(),
            MockVectorStore::new(),
        );

        let response = app
            .oneshot(post_json("/query", r#"{"query": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_query_is_400() {
        let app = router(
            MockLlmProvider::new("mock").with_reply("ok"),
            MockGuardrail::new(),
            MockVectorStore::new(),
        );

        let response = app
            .oneshot(post_json("/query", r#"{"query": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_live_and_unknown_routes() {
        let app = router(
            MockLlmProvider::new("mock"),
            MockGuardrail::new(),
            MockVectorStore::new(),
        );

        let live = app
            .clone()
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(live.status(), StatusCode::OK);

        let missing = app
            .oneshot(Request::get("/query").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
