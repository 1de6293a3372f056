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

use casting_core::models::{Claims, CreateMovie, UpdateMovie};

use crate::{ApiError, ApiResult, AppState};

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let movies = state.movie_service.list().await?;
    Ok(Json(json!({ "success": true, "movies": movies })))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateMovie>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let movie = state
        .movie_service
        .create(input)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(movie_id = movie.id, by = %claims.sub, "POST /movies");
    Ok(Json(json!({ "success": true, "movie": movie })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateMovie>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let movie = state
        .movie_service
        .update(id, input)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(movie_id = id, by = %claims.sub, "PATCH /movies");
    Ok(Json(json!({
        "success": true,
        "id": movie.id,
        "title": movie.title,
        "release_date": movie.release_date,
    })))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;
    state
        .movie_service
        .delete(id)
        .await
        .map_err(ApiError::from_delete)?;

    tracing::info!(movie_id = id, by = %claims.sub, "DELETE /movies");
    Ok(Json(json!({ "success": true, "movie": id })))
}
