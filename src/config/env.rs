//! Runtime configuration read from the process environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use std::str::FromStr;

/// Which backing store serves the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    /// Required when `store` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            store: StoreBackend::Postgres,
            database_url: None,
            max_connections: 5,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables with defaults. A `.env` file, if present,
    /// fills in variables that are not already set.
    ///
    /// | Env Var                    | Default    |
    /// |----------------------------|------------|
    /// | `HOST`                     | `0.0.0.0`  |
    /// | `PORT`                     | `3000`     |
    /// | `CATALOG_STORE`            | `postgres` |
    /// | `DATABASE_URL`             | (none)     |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`        |
    /// | `BODY_LIMIT_BYTES`         | `65536`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CatalogConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let store = parse_var(&lookup, "CATALOG_STORE")?.unwrap_or(defaults.store);
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let max_connections =
            parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections);
        let body_limit_bytes =
            parse_var(&lookup, "BODY_LIMIT_BYTES")?.unwrap_or(defaults.body_limit_bytes);
        Ok(Self {
            host,
            port,
            store,
            database_url,
            max_connections,
            body_limit_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map(Some).map_err(|_| ConfigError::Invalid { name, value })
        }
    }
}
