//! Collection admin endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use vocab_core::ImportPlan;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/admin/collections
pub async fn list(State(state): State<AppState>) -> Result<Json<CollectionListResponse>> {
    let collections = state.db.list_collections().await?;
    Ok(Json(CollectionListResponse { collections }))
}

/// POST /api/admin/collections/import
pub async fn import(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportSummary>)> {
    let name = request.collection_name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput(
            "collection_name must not be empty".to_string(),
        ));
    }

    let plan = ImportPlan::from_document(request.document);
    if plan.dropped_words > 0 {
        tracing::warn!(
            "Import '{}': dropping {} words with unknown topic_id",
            name,
            plan.dropped_words
        );
    }

    let summary = state.db.import_collection(name, &plan).await?;

    tracing::info!(
        "Imported collection '{}' ({}): {} topics, {} words",
        summary.collection_name,
        summary.collection_id,
        summary.topics_created,
        summary.words_created
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

/// DELETE /api/admin/collections/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    if !state.db.delete_collection(collection_id).await? {
        return Err(ApiError::NotFound(format!(
            "Collection {} not found",
            collection_id
        )));
    }

    tracing::info!("Deleted collection {}", collection_id);
    Ok(Json(StatusResponse::success("Collection deleted")))
}

/// POST /api/admin/collections/:id/visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
) -> Result<Json<VisibilityResponse>> {
    let is_visible = state
        .db
        .toggle_collection_visibility(collection_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Collection {} not found", collection_id)))?;

    Ok(Json(VisibilityResponse {
        status: "success".to_string(),
        is_visible,
    }))
}

/// GET /api/admin/collections/:id/topics
pub async fn topics(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
) -> Result<Json<CollectionTopicsResponse>> {
    let collection = state
        .db
        .get_collection(collection_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Collection {} not found", collection_id)))?;
    let topics = state.db.list_topics(collection_id).await?;

    Ok(Json(CollectionTopicsResponse { collection, topics }))
}

/// POST /api/admin/collections/:id/topics
pub async fn add_topic(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
    Json(input): Json<TopicInput>,
) -> Result<(StatusCode, Json<Topic>)> {
    let input = input.validate()?;
    let topic = state.db.append_topic(collection_id, &input).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}

/// PUT /api/admin/collections/:id/topics/order
pub async fn reorder_topics(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<StatusResponse>> {
    let ordering = request.into_ids()?;
    let updated = state.db.reorder_topics(collection_id, &ordering).await?;

    tracing::info!("Reordered {} topics in collection {}", updated, collection_id);
    Ok(Json(StatusResponse::success("Topic order updated")))
}
