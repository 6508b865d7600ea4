//! HTTP handlers for actor and movie endpoints.
//!
//! Each handler runs parse, validate, execute, project: [`RequestData`](crate::extractors::RequestData)
//! is checked by [`RequestValidator`](crate::service::RequestValidator), one store call is made,
//! and the result is returned as a view from [`crate::response`].

pub mod actor;
pub mod movie;
pub use actor::*;
pub use movie::*;

use crate::error::AppError;
use crate::service::RelationIds;
use crate::store::CatalogStore;

/// Both ends of a relation must exist before the link is written.
async fn ensure_relation_ends(store: &dyn CatalogStore, ids: RelationIds) -> Result<(), AppError> {
    if store.find_actor(ids.actor_id).await?.is_none() {
        return Err(AppError::NotFound("Actor with such id does not exist".into()));
    }
    if store.find_movie(ids.movie_id).await?.is_none() {
        return Err(AppError::NotFound("Movie with such id does not exist".into()));
    }
    Ok(())
}
