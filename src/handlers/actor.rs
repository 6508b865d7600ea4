//! Actor endpoints: list, get, create, update, delete, filmography add/clear.

use super::ensure_relation_ends;
use crate::error::{AppError, RECORD_NOT_FOUND};
use crate::extractors::RequestData;
use crate::registry::EntityKind;
use crate::response::{ActorRelationsView, ActorView, MessageBody, DELETED};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn list_actors(State(state): State<AppState>) -> Result<Json<Vec<ActorView>>, AppError> {
    let actors = state.store.list_actors().await?;
    Ok(Json(actors.iter().map(ActorView::from).collect()))
}

pub async fn get_actor(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<ActorView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let actor = state
        .store
        .find_actor(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.into()))?;
    Ok(Json(ActorView::from(&actor)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<ActorView>, AppError> {
    let new = RequestValidator::new_actor(&data)?;
    let actor = state.store.create_actor(new).await?;
    tracing::info!(id = actor.id, "actor created");
    Ok(Json(ActorView::from(&actor)))
}

pub async fn update_actor(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<ActorView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let patch = RequestValidator::actor_patch(&data)?;
    let actor = state.store.update_actor(id, patch).await?;
    tracing::info!(id, "actor updated");
    Ok(Json(ActorView::from(&actor)))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<MessageBody>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    state.store.delete_actor(id).await?;
    tracing::info!(id, "actor deleted");
    Ok(Json(DELETED))
}

pub async fn actor_add_relation(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<ActorRelationsView>, AppError> {
    let ids = RequestValidator::relation(&data, EntityKind::Actor)?;
    ensure_relation_ends(state.store.as_ref(), ids).await?;
    let actor = state.store.add_actor_relation(ids.actor_id, ids.movie_id).await?;
    tracing::info!(actor_id = ids.actor_id, movie_id = ids.movie_id, "filmography extended");
    Ok(Json(ActorRelationsView::from(&actor)))
}

pub async fn actor_clear_relations(
    State(state): State<AppState>,
    data: RequestData,
) -> Result<Json<ActorRelationsView>, AppError> {
    let id = RequestValidator::require_id(&data)?;
    let actor = state.store.clear_actor_relations(id).await?;
    tracing::info!(id, "filmography cleared");
    Ok(Json(ActorRelationsView::from(&actor)))
}
