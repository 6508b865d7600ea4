//! Movie endpoints: list, get, create, update, delete, cast add/clear.

use super::ensure_relation_ends;
use crate::error::{AppError, RECORD_NOT_FOUND};
use crate::extractors::RequestData;
use crate::registry::EntityKind;
use crate::response::{MessageBody, MovieRelationsView, MovieView, DELETED};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<MovieView>>, AppError> {
    let movies = state.store.list_movies().await?;
    Ok(Json(movies.iter().map(MovieView::from).collect()))
}

pub async fn get_movie(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MovieView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let movie = state
        .store
        .find_movie(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.into()))?;
    Ok(Json(MovieView::from(&movie)))
}

pub async fn create_movie(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MovieView>, AppError> {
    let new = RequestValidator::new_movie(&data)?;
    let movie = state.store.create_movie(new).await?;
    tracing::info!(id = movie.id, "movie created");
    Ok(Json(MovieView::from(&movie)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MovieView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let patch = RequestValidator::movie_patch(&data)?;
    let movie = state.store.update_movie(id, patch).await?;
    tracing::info!(id, "movie updated");
    Ok(Json(MovieView::from(&movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MessageBody>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    state.store.delete_movie(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(Json(DELETED))
}

pub async fn movie_add_relation(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MovieRelationsView>, AppError> {
    let ids = RequestValidator::relation(&data, EntityKind::Movie)?;
    ensure_relation_ends(state.store.as_ref(), ids).await?;
    let movie = state.store.add_movie_relation(ids.movie_id, ids.actor_id).await?;
    tracing::info!(movie_id = ids.movie_id, actor_id = ids.actor_id, "cast extended");
    Ok(Json(MovieRelationsView::from(&movie)))
}

pub async fn movie_clear_relations(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MovieRelationsView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let movie = state.store.clear_movie_relations(id).await?;
    tracing::info!(id, "cast cleared");
    Ok(Json(MovieRelationsView::from(&movie)))
}
