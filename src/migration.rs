//! Catalog schema DDL. Every statement is idempotent, so this runs on each startup.

use crate::error::StoreError;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgPool};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS actors (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        gender TEXT NOT NULL,
        date_of_birth DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        year INTEGER NOT NULL,
        genre TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS actor_movie (
        actor_id BIGINT NOT NULL REFERENCES actors (id) ON DELETE CASCADE,
        movie_id BIGINT NOT NULL REFERENCES movies (id) ON DELETE CASCADE,
        PRIMARY KEY (actor_id, movie_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS actor_movie_movie_id_idx ON actor_movie (movie_id)",
];

/// Create the actors, movies, and actor_movie tables if they are missing.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for ddl in SCHEMA {
        sqlx::query(*ddl).execute(pool).await?;
    }
    tracing::info!("catalog schema ready");
    Ok(())
}

/// Create the catalog database named in `database_url` when it does not exist yet.
/// Runs over a short-lived connection to the maintenance `postgres` database,
/// before the main pool is built.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = maintenance_target(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn = admin.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating catalog database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    conn.close().await?;
    Ok(())
}

/// Options for the maintenance database, plus the catalog database name when
/// it is one that may need creating.
fn maintenance_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = opts
        .get_database()
        .map(str::to_string)
        .filter(|name| !name.is_empty() && name != "postgres");
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
