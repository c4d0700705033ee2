//! Topic admin endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn not_found(topic_id: i64) -> ApiError {
    ApiError::NotFound(format!("Topic {} not found", topic_id))
}

/// GET /api/admin/topics/:id
pub async fn get(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<Json<Topic>> {
    let topic = state
        .db
        .get_topic(topic_id)
        .await?
        .ok_or_else(|| not_found(topic_id))?;
    Ok(Json(topic))
}

/// PUT /api/admin/topics/:id
pub async fn update(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(input): Json<TopicInput>,
) -> Result<Json<Topic>> {
    let input = input.validate()?;
    let topic = state
        .db
        .update_topic(topic_id, &input)
        .await?
        .ok_or_else(|| not_found(topic_id))?;
    Ok(Json(topic))
}

/// DELETE /api/admin/topics/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    if !state.db.delete_topic(topic_id).await? {
        return Err(not_found(topic_id));
    }

    tracing::info!("Deleted topic {}", topic_id);
    Ok(Json(StatusResponse::success("Topic deleted")))
}

/// GET /api/admin/topics/:id/words
pub async fn words(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<Json<TopicWordsResponse>> {
    let topic = state
        .db
        .get_topic_with_collection(topic_id)
        .await?
        .ok_or_else(|| not_found(topic_id))?;
    let words = state.db.list_words(topic_id).await?;

    Ok(Json(TopicWordsResponse { topic, words }))
}

/// POST /api/admin/topics/:id/words
pub async fn add_word(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(input): Json<WordInput>,
) -> Result<(StatusCode, Json<Word>)> {
    let input = input.validate()?;
    let word = state.db.append_word(topic_id, &input).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// PUT /api/admin/topics/:id/words/order
pub async fn reorder_words(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<StatusResponse>> {
    let ordering = request.into_ids()?;
    let updated = state.db.reorder_words(topic_id, &ordering).await?;

    tracing::info!("Reordered {} words in topic {}", updated, topic_id);
    Ok(Json(StatusResponse::success("Word order updated")))
}
