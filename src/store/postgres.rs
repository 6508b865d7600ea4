//! PostgreSQL store. Relation ids are aggregated per row with `array_agg`,
//! so every read returns the entity together with its side of the association.

use super::CatalogStore;
use crate::error::StoreError;
use crate::model::{Actor, ActorPatch, Movie, MoviePatch, NewActor, NewMovie};
use crate::registry::EntityKind;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

const SELECT_ACTORS: &str = r#"
    SELECT a.id, a.name, a.gender, a.date_of_birth,
           COALESCE(array_agg(am.movie_id ORDER BY am.movie_id)
                    FILTER (WHERE am.movie_id IS NOT NULL), '{}') AS related
    FROM actors a
    LEFT JOIN actor_movie am ON am.actor_id = a.id
"#;

const SELECT_MOVIES: &str = r#"
    SELECT m.id, m.name, m.year, m.genre,
           COALESCE(array_agg(am.actor_id ORDER BY am.actor_id)
                    FILTER (WHERE am.actor_id IS NOT NULL), '{}') AS related
    FROM movies m
    LEFT JOIN actor_movie am ON am.movie_id = m.id
"#;

#[derive(sqlx::FromRow)]
struct ActorRow {
    id: i64,
    name: String,
    gender: String,
    date_of_birth: NaiveDate,
    related: Vec<i64>,
}

impl From<ActorRow> for Actor {
    fn from(r: ActorRow) -> Self {
        Actor {
            id: r.id,
            name: r.name,
            gender: r.gender,
            date_of_birth: r.date_of_birth,
            filmography: r.related.into_iter().collect(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: i64,
    name: String,
    year: i32,
    genre: String,
    related: Vec<i64>,
}

impl From<MovieRow> for Movie {
    fn from(r: MovieRow) -> Self {
        Movie {
            id: r.id,
            name: r.name,
            year: r.year,
            genre: r.genre,
            cast: r.related.into_iter().collect(),
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_actor(&self, id: i64) -> Result<Actor, StoreError> {
        self.find_actor(id)
            .await?
            .ok_or(StoreError::NotFound { kind: EntityKind::Actor, id })
    }

    async fn require_movie(&self, id: i64) -> Result<Movie, StoreError> {
        self.find_movie(id)
            .await?
            .ok_or(StoreError::NotFound { kind: EntityKind::Movie, id })
    }

    async fn link(&self, actor_id: i64, movie_id: i64) -> Result<(), StoreError> {
        let sql = "INSERT INTO actor_movie (actor_id, movie_id) VALUES ($1, $2) ON CONFLICT DO NOTHING";
        tracing::debug!(sql = %sql, actor_id, movie_id, "query");
        sqlx::query(sql)
            .bind(actor_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unlink(&self, column: &'static str, id: i64) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM actor_movie WHERE {} = $1", column);
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn delete_row(&self, kind: EntityKind, table: &'static str, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_actors(&self) -> Result<Vec<Actor>, StoreError> {
        let sql = format!("{} GROUP BY a.id ORDER BY a.id", SELECT_ACTORS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<ActorRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Actor::from).collect())
    }

    async fn find_actor(&self, id: i64) -> Result<Option<Actor>, StoreError> {
        let sql = format!("{} WHERE a.id = $1 GROUP BY a.id", SELECT_ACTORS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<ActorRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Actor::from))
    }

    async fn create_actor(&self, new: NewActor) -> Result<Actor, StoreError> {
        let sql = "INSERT INTO actors (name, gender, date_of_birth) VALUES ($1, $2, $3) RETURNING id";
        tracing::debug!(sql = %sql, "query");
        let (id,): (i64,) = sqlx::query_as(sql)
            .bind(&new.name)
            .bind(&new.gender)
            .bind(new.date_of_birth)
            .fetch_one(&self.pool)
            .await?;
        Ok(Actor {
            id,
            name: new.name,
            gender: new.gender,
            date_of_birth: new.date_of_birth,
            filmography: Default::default(),
        })
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, StoreError> {
        let sql = r#"
            UPDATE actors
            SET name = COALESCE($2, name),
                gender = COALESCE($3, gender),
                date_of_birth = COALESCE($4, date_of_birth)
            WHERE id = $1
            RETURNING id
        "#;
        tracing::debug!(sql = %sql, id, "query");
        let updated: Option<(i64,)> = sqlx::query_as(sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.gender)
            .bind(patch.date_of_birth)
            .fetch_optional(&self.pool)
            .await?;
        if updated.is_none() {
            return Err(StoreError::NotFound { kind: EntityKind::Actor, id });
        }
        self.require_actor(id).await
    }

    async fn delete_actor(&self, id: i64) -> Result<(), StoreError> {
        // actor_movie rows go with it via ON DELETE CASCADE.
        self.delete_row(EntityKind::Actor, "actors", id).await
    }

    async fn add_actor_relation(&self, id: i64, movie_id: i64) -> Result<Actor, StoreError> {
        self.link(id, movie_id).await?;
        self.require_actor(id).await
    }

    async fn clear_actor_relations(&self, id: i64) -> Result<Actor, StoreError> {
        let removed = self.unlink("actor_id", id).await?;
        tracing::debug!(id, removed, "filmography cleared");
        self.require_actor(id).await
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let sql = format!("{} GROUP BY m.id ORDER BY m.id", SELECT_MOVIES);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<MovieRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        let sql = format!("{} WHERE m.id = $1 GROUP BY m.id", SELECT_MOVIES);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<MovieRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let sql = "INSERT INTO movies (name, year, genre) VALUES ($1, $2, $3) RETURNING id";
        tracing::debug!(sql = %sql, "query");
        let (id,): (i64,) = sqlx::query_as(sql)
            .bind(&new.name)
            .bind(new.year)
            .bind(&new.genre)
            .fetch_one(&self.pool)
            .await?;
        Ok(Movie {
            id,
            name: new.name,
            year: new.year,
            genre: new.genre,
            cast: Default::default(),
        })
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, StoreError> {
        let sql = r#"
            UPDATE movies
            SET name = COALESCE($2, name),
                year = COALESCE($3, year),
                genre = COALESCE($4, genre)
            WHERE id = $1
            RETURNING id
        "#;
        tracing::debug!(sql = %sql, id, "query");
        let updated: Option<(i64,)> = sqlx::query_as(sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.year)
            .bind(patch.genre)
            .fetch_optional(&self.pool)
            .await?;
        if updated.is_none() {
            return Err(StoreError::NotFound { kind: EntityKind::Movie, id });
        }
        self.require_movie(id).await
    }

    async fn delete_movie(&self, id: i64) -> Result<(), StoreError> {
        self.delete_row(EntityKind::Movie, "movies", id).await
    }

    async fn add_movie_relation(&self, id: i64, actor_id: i64) -> Result<Movie, StoreError> {
        self.link(actor_id, id).await?;
        self.require_movie(id).await
    }

    async fn clear_movie_relations(&self, id: i64) -> Result<Movie, StoreError> {
        let removed = self.unlink("movie_id", id).await?;
        tracing::debug!(id, removed, "cast cleared");
        self.require_movie(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
