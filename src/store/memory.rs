//! In-process store. Rows live in ordered maps behind one async lock; the
//! association is a single set of `(actor_id, movie_id)` pairs.

use super::CatalogStore;
use crate::error::StoreError;
use crate::model::{Actor, ActorPatch, Movie, MoviePatch, NewActor, NewMovie};
use crate::registry::EntityKind;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
struct ActorRow {
    name: String,
    gender: String,
    date_of_birth: NaiveDate,
}

#[derive(Clone, Debug)]
struct MovieRow {
    name: String,
    year: i32,
    genre: String,
}

#[derive(Debug, Default)]
struct Tables {
    actors: BTreeMap<i64, ActorRow>,
    movies: BTreeMap<i64, MovieRow>,
    links: BTreeSet<(i64, i64)>,
    last_actor_id: i64,
    last_movie_id: i64,
}

impl Tables {
    fn actor(&self, id: i64) -> Option<Actor> {
        let row = self.actors.get(&id)?;
        let filmography = self
            .links
            .iter()
            .filter(|(a, _)| *a == id)
            .map(|(_, m)| *m)
            .collect();
        Some(Actor {
            id,
            name: row.name.clone(),
            gender: row.gender.clone(),
            date_of_birth: row.date_of_birth,
            filmography,
        })
    }

    fn movie(&self, id: i64) -> Option<Movie> {
        let row = self.movies.get(&id)?;
        let cast = self
            .links
            .iter()
            .filter(|(_, m)| *m == id)
            .map(|(a, _)| *a)
            .collect();
        Some(Movie {
            id,
            name: row.name.clone(),
            year: row.year,
            genre: row.genre.clone(),
            cast,
        })
    }

    fn require_actor(&self, id: i64) -> Result<Actor, StoreError> {
        self.actor(id).ok_or(StoreError::NotFound { kind: EntityKind::Actor, id })
    }

    fn require_movie(&self, id: i64) -> Result<Movie, StoreError> {
        self.movie(id).ok_or(StoreError::NotFound { kind: EntityKind::Movie, id })
    }

    /// Inserts a link after checking both ends, mirroring the foreign keys of the SQL schema.
    fn link(&mut self, actor_id: i64, movie_id: i64) -> Result<(), StoreError> {
        if !self.actors.contains_key(&actor_id) {
            return Err(StoreError::NotFound { kind: EntityKind::Actor, id: actor_id });
        }
        if !self.movies.contains_key(&movie_id) {
            return Err(StoreError::NotFound { kind: EntityKind::Movie, id: movie_id });
        }
        self.links.insert((actor_id, movie_id));
        Ok(())
    }
}

/// Embedded store for tests and database-less runs. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_actors(&self) -> Result<Vec<Actor>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.actors.keys().filter_map(|id| t.actor(*id)).collect())
    }

    async fn find_actor(&self, id: i64) -> Result<Option<Actor>, StoreError> {
        Ok(self.tables.read().await.actor(id))
    }

    async fn create_actor(&self, new: NewActor) -> Result<Actor, StoreError> {
        let mut t = self.tables.write().await;
        t.last_actor_id += 1;
        let id = t.last_actor_id;
        t.actors.insert(
            id,
            ActorRow {
                name: new.name,
                gender: new.gender,
                date_of_birth: new.date_of_birth,
            },
        );
        tracing::debug!(id, "memory: actor created");
        t.require_actor(id)
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, StoreError> {
        let mut t = self.tables.write().await;
        let mut actor = t.require_actor(id)?;
        patch.apply(&mut actor);
        t.actors.insert(
            id,
            ActorRow {
                name: actor.name.clone(),
                gender: actor.gender.clone(),
                date_of_birth: actor.date_of_birth,
            },
        );
        Ok(actor)
    }

    async fn delete_actor(&self, id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.actors
            .remove(&id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Actor, id })?;
        t.links.retain(|(a, _)| *a != id);
        tracing::debug!(id, "memory: actor deleted");
        Ok(())
    }

    async fn add_actor_relation(&self, id: i64, movie_id: i64) -> Result<Actor, StoreError> {
        let mut t = self.tables.write().await;
        t.link(id, movie_id)?;
        t.require_actor(id)
    }

    async fn clear_actor_relations(&self, id: i64) -> Result<Actor, StoreError> {
        let mut t = self.tables.write().await;
        t.require_actor(id)?;
        t.links.retain(|(a, _)| *a != id);
        t.require_actor(id)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.movies.keys().filter_map(|id| t.movie(*id)).collect())
    }

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        Ok(self.tables.read().await.movie(id))
    }

    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let mut t = self.tables.write().await;
        t.last_movie_id += 1;
        let id = t.last_movie_id;
        t.movies.insert(
            id,
            MovieRow {
                name: new.name,
                year: new.year,
                genre: new.genre,
            },
        );
        tracing::debug!(id, "memory: movie created");
        t.require_movie(id)
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, StoreError> {
        let mut t = self.tables.write().await;
        let mut movie = t.require_movie(id)?;
        patch.apply(&mut movie);
        t.movies.insert(
            id,
            MovieRow {
                name: movie.name.clone(),
                year: movie.year,
                genre: movie.genre.clone(),
            },
        );
        Ok(movie)
    }

    async fn delete_movie(&self, id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.movies
            .remove(&id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Movie, id })?;
        t.links.retain(|(_, m)| *m != id);
        tracing::debug!(id, "memory: movie deleted");
        Ok(())
    }

    async fn add_movie_relation(&self, id: i64, actor_id: i64) -> Result<Movie, StoreError> {
        let mut t = self.tables.write().await;
        t.link(actor_id, id)?;
        t.require_movie(id)
    }

    async fn clear_movie_relations(&self, id: i64) -> Result<Movie, StoreError> {
        let mut t = self.tables.write().await;
        t.require_movie(id)?;
        t.links.retain(|(_, m)| *m != id);
        t.require_movie(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
