//! Query endpoint handlers

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest};
use crate::domain::GenerationMode;

/// POST /query
pub async fn plain_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<String, ApiError> {
    answer(&state, GenerationMode::Plain, request).await
}

/// POST /ragquery
pub async fn rag_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<String, ApiError> {
    answer(&state, GenerationMode::Rag, request).await
}

/// POST /fullquery
pub async fn full_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<String, ApiError> {
    answer(&state, GenerationMode::Full, request).await
}

async fn answer(
    state: &AppState,
    mode: GenerationMode,
    request: QueryRequest,
) -> Result<String, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        mode = %mode,
        query_chars = request.query.chars().count(),
        "Processing query"
    );

    let deadline = state.deadline();
    let answer = state.answers.answer(mode, &request.query, &deadline).await?;

    Ok(answer)
}
