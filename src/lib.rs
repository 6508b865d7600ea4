//! Movie catalog: REST CRUD over actors and movies with many-to-many relation management.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod registry;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{CatalogConfig, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use registry::{fields_for, EntityKind};
pub use routes::{app, catalog_routes, common_routes};
pub use state::AppState;
pub use store::{CatalogStore, MemoryStore, PgStore};
