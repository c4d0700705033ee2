//! Learner endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/data
pub async fn data(State(state): State<AppState>) -> Result<Json<DataResponse>> {
    let collections = state.db.get_visible_collections().await?;
    let topics = state.db.get_visible_topics().await?;
    let words = state.db.get_visible_words().await?;
    let user_data = state.db.get_all_progress().await?;

    Ok(Json(DataResponse {
        collections,
        topics,
        words,
        user_data,
    }))
}

/// POST /api/update_srs
pub async fn update_srs(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSrsRequest>,
) -> Result<Json<UpdateSrsResponse>> {
    let word_id = payload.resolve_word_id()?;

    let outcome = ReviewOutcome::from_correct(payload.is_correct);
    let applied = state
        .db
        .apply_review(word_id, outcome, state.scheduler.as_ref(), Utc::now())
        .await?;

    tracing::info!(
        "Reviewed word {} ({:?}): level {} -> {}",
        word_id,
        outcome,
        applied.previous_level,
        applied.new_level
    );

    Ok(Json(UpdateSrsResponse {
        status: "success".to_string(),
        word_id,
        new_level: applied.new_level,
        next_review_at: applied.next_review_at,
    }))
}
