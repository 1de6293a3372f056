use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::IntoResponse,
};
use serde_json::json;

use casting_core::models::{Claims, CreateActor, UpdateActor};

use crate::{ApiError, ApiResult, AppState};

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let actors = state.actor_service.list().await?;
    Ok(Json(json!({ "success": true, "actors": actors })))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateActor>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let actor = state
        .actor_service
        .create(input)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(actor_id = actor.id, by = %claims.sub, "POST /actors");
    Ok(Json(json!({ "success": true, "actor": actor })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateActor>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let actor = state
        .actor_service
        .update(id, input)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(actor_id = id, by = %claims.sub, "PATCH /actors");
    Ok(Json(json!({
        "success": true,
        "id": actor.id,
        "name": actor.name,
        "age": actor.age,
        "gender": actor.gender,
    })))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;
    state
        .actor_service
        .delete(id)
        .await
        .map_err(ApiError::from_delete)?;

    tracing::info!(actor_id = id, by = %claims.sub, "DELETE /actors");
    Ok(Json(json!({ "success": true, "actor": id })))
}
