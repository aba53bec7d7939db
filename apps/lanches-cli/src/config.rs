//! CLI configuration module.
//!
//! Configuration is layered with the `config` crate, later sources winning:
//!
//! ```text
//! built-in defaults  →  TOML file (optional)  →  LANCHES_* environment
//! ```
//!
//! | Key                      | Env var                          | Default                          |
//! |--------------------------|----------------------------------|----------------------------------|
//! | `database_path`          | `LANCHES_DATABASE_PATH`          | `lanches.db`                     |
//! | `max_connections`        | `LANCHES_MAX_CONNECTIONS`        | `5`                              |
//! | `min_connections`        | `LANCHES_MIN_CONNECTIONS`        | `1`                              |
//! | `operation_timeout_secs` | `LANCHES_OPERATION_TIMEOUT_SECS` | `30`                             |
//! | `log_filter`             | `LANCHES_LOG_FILTER`             | `info,lanches=debug,sqlx=warn`   |

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use lanches_db::DbConfig;
use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,lanches=debug,sqlx=warn";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size upper bound
    pub max_connections: u32,

    /// Connections kept open while idle
    pub min_connections: u32,

    /// Upper bound on every store-touching call, in seconds
    pub operation_timeout_secs: u64,

    /// tracing-subscriber EnvFilter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from defaults, the optional file and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, Environment::with_prefix("LANCHES"))
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database_path", "lanches.db")?
            .set_default("max_connections", 5_i64)?
            .set_default("min_connections", 1_i64)?
            .set_default("operation_timeout_secs", 30_i64)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?;

        builder = match file {
            // An explicitly named file must exist
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("lanches").required(false)),
        };

        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Timeout applied around every database operation.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    /// Pool configuration for the database layer.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("LANCHES").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with_env(None, env(&[])).unwrap();

        assert_eq!(config.database_path, PathBuf::from("lanches.db"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.operation_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = AppConfig::load_with_env(
            None,
            env(&[
                ("LANCHES_DATABASE_PATH", "/var/lib/lanches/pos.db"),
                ("LANCHES_OPERATION_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/lanches/pos.db"));
        assert_eq!(config.operation_timeout_secs, 5);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_file_then_env() {
        let path = std::env::temp_dir().join(format!("lanches-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "database_path = \"from-file.db\"\nmax_connections = 8\n",
        )
        .unwrap();

        let config =
            AppConfig::load_with_env(Some(&path), env(&[("LANCHES_MAX_CONNECTIONS", "2")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.database_path, PathBuf::from("from-file.db"));
        assert_eq!(config.max_connections, 2);

        let db = config.db_config();
        assert_eq!(db.max_connections, 2);
        assert_eq!(db.min_connections, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("lanches-does-not-exist.toml");
        assert!(AppConfig::load_with_env(Some(&path), env(&[])).is_err());
    }
}
