//! Server configuration

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Which persistence adapter backs the user store
    pub storage_backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Hand-written SQL statements (sqlx)
    Sql,
    /// ORM session semantics (SeaORM)
    Orm,
}

/// Load configuration from defaults, an optional `userapi` file and
/// `USERAPI_*` environment variables, in that order of precedence.
pub fn load() -> Result<Config> {
    let cfg = config::Config::builder()
        .set_default("bind_address", "0.0.0.0:8080")?
        .set_default("database_path", "data/userapi.db")?
        .set_default("storage_backend", "sql")?
        .add_source(config::File::with_name("userapi").required(false))
        .add_source(config::Environment::with_prefix("USERAPI"))
        .build()
        .context("Failed to read configuration")?;

    cfg.try_deserialize().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(backend: &str) -> Config {
        config::Config::builder()
            .set_default("bind_address", "127.0.0.1:0")
            .unwrap()
            .set_default("database_path", ":memory:")
            .unwrap()
            .set_default("storage_backend", backend)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(parse("sql").storage_backend, StorageBackend::Sql);
        assert_eq!(parse("orm").storage_backend, StorageBackend::Orm);
    }
}
