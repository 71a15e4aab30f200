use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::HistoryRecord,
    service::HistoryService,
    types::{
        DeleteQuery, DeleteResponse, FavoriteResponse, FeedbackResponse, HistoryResponse,
        SummaryResponse,
    },
};
use crate::shared::{non_empty, parse_id, AppError, AppState, JsonPayload};

/// Create history API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/username-history", get(list_history).post(mark_favorite))
        .route("/username-history/:id", get(get_history_record))
        .route("/username-feedback/:id", post(submit_feedback))
        .route(
            "/username-history-summary",
            get(history_summary).delete(delete_history_record),
        )
}

fn service(state: &AppState) -> HistoryService {
    HistoryService::new(Arc::clone(&state.history_repository))
}

/// GET /username-history
#[instrument(name = "list_history", skip(state))]
pub async fn list_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let history = service(&state).list().await?;
    info!(record_count = history.len(), "History listed");
    Ok(Json(HistoryResponse { history }))
}

/// POST /username-history `{"id": 1}`
///
/// Marks the record as favorite
#[instrument(name = "mark_favorite", skip(state, payload))]
pub async fn mark_favorite(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<FavoriteResponse>, AppError> {
    let id = payload.require_id("id")?;
    let response = service(&state).mark_favorite(id).await?;
    Ok(Json(response))
}

/// GET /username-history/:id
#[instrument(name = "get_history_record", skip(state))]
pub async fn get_history_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryRecord>, AppError> {
    let id = parse_id(&id)?;
    let record = service(&state).get(id).await?;
    Ok(Json(record))
}

/// POST /username-feedback/:id `{"feedback": "...", "preference": "approve"}`
#[instrument(name = "submit_feedback", skip(state, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<Json<FeedbackResponse>, AppError> {
    let id = parse_id(&id)?;
    let feedback = payload.optional_str("feedback")?.map(str::to_string);
    let preference = payload.optional_str("preference")?;

    let response = service(&state)
        .give_feedback(id, feedback, preference)
        .await?;
    Ok(Json(response))
}

/// GET /username-history-summary
#[instrument(name = "history_summary", skip(state))]
pub async fn history_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = service(&state).summary().await?;
    Ok(Json(SummaryResponse { summary }))
}

/// DELETE /username-history-summary?id=1
///
/// Falls back to `{"id": 1}` in the body when the query has no id.
/// An empty body means the id is missing; any other unreadable body is malformed.
#[instrument(name = "delete_history_record", skip(state, body))]
pub async fn delete_history_record(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
    body: Bytes,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = match non_empty(&query.id) {
        Some(raw) => parse_id(raw)?,
        None if body.iter().all(u8::is_ascii_whitespace) => {
            return Err(AppError::MissingParameter("id".to_string()))
        }
        None => JsonPayload::from_slice(&body)?.require_id("id")?,
    };

    let response = service(&state).delete(id).await?;
    info!(id, "History record deleted");
    Ok(Json(response))
}
