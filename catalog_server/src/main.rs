//! Catalog server: reads configuration from the environment, prepares the store, and serves the API.
//!
//! Run from repo root: `cargo run -p catalog-server`
//! Without a database: `CATALOG_STORE=memory cargo run -p catalog-server`

use movie_catalog::{
    app, apply_migrations, ensure_database_exists, telemetry, AppState, CatalogConfig, ConfigError,
    MemoryStore, PgStore, StoreBackend,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("movie_catalog=info,catalog_server=info,tower_http=info");

    let config = CatalogConfig::from_env()?;
    let state = match config.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            AppState::new(MemoryStore::new())
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            apply_migrations(&pool).await?;
            AppState::new(PgStore::new(pool))
        }
    };

    let app = app(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("catalog listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
