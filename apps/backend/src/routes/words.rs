//! Word admin endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn not_found(word_id: i64) -> ApiError {
    ApiError::NotFound(format!("Word {} not found", word_id))
}

/// GET /api/admin/words/:id
pub async fn get(State(state): State<AppState>, Path(word_id): Path<i64>) -> Result<Json<Word>> {
    let word = state
        .db
        .get_word(word_id)
        .await?
        .ok_or_else(|| not_found(word_id))?;
    Ok(Json(word))
}

/// PUT /api/admin/words/:id
pub async fn update(
    State(state): State<AppState>,
    Path(word_id): Path<i64>,
    Json(input): Json<WordInput>,
) -> Result<Json<Word>> {
    let input = input.validate()?;
    let word = state
        .db
        .update_word(word_id, &input)
        .await?
        .ok_or_else(|| not_found(word_id))?;
    Ok(Json(word))
}

/// DELETE /api/admin/words/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(word_id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    if !state.db.delete_word(word_id).await? {
        return Err(not_found(word_id));
    }

    tracing::info!("Deleted word {}", word_id);
    Ok(Json(StatusResponse::success("Word deleted")))
}
