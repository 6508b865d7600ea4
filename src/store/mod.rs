//! Entity store: the repository interface the handlers talk to, and its backends.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use crate::model::{Actor, ActorPatch, Movie, MoviePatch, NewActor, NewMovie};
use async_trait::async_trait;

/// Persistence for actors, movies, and the single association between them.
///
/// Relation methods take the id of the entity whose projection is returned
/// first. Both `filmography` and `cast` are read from the same association,
/// so a link added through one side is visible from the other.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn list_actors(&self) -> Result<Vec<Actor>, StoreError>;

    async fn find_actor(&self, id: i64) -> Result<Option<Actor>, StoreError>;

    async fn create_actor(&self, new: NewActor) -> Result<Actor, StoreError>;

    /// Returns `Err(NotFound)` if no actor has `id`.
    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, StoreError>;

    /// Removes the actor and every association row that references it.
    async fn delete_actor(&self, id: i64) -> Result<(), StoreError>;

    /// Links `movie_id` into the actor's filmography. Adding an existing link is a no-op.
    async fn add_actor_relation(&self, id: i64, movie_id: i64) -> Result<Actor, StoreError>;

    async fn clear_actor_relations(&self, id: i64) -> Result<Actor, StoreError>;

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, StoreError>;

    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError>;

    /// Returns `Err(NotFound)` if no movie has `id`.
    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, StoreError>;

    /// Removes the movie and every association row that references it.
    async fn delete_movie(&self, id: i64) -> Result<(), StoreError>;

    /// Links `actor_id` into the movie's cast. Adding an existing link is a no-op.
    async fn add_movie_relation(&self, id: i64, actor_id: i64) -> Result<Movie, StoreError>;

    async fn clear_movie_relations(&self, id: i64) -> Result<Movie, StoreError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Backend name reported by `/ready`.
    fn backend(&self) -> &'static str;
}
