//! # Lanches CLI
//!
//! Operator command line for the Lanches POS sale engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           lanches binary                                │
//! │                                                                         │
//! │  args ──► AppConfig::load ──► init_tracing ──► Database::new           │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                      Context { db, timeout } ──► commands::run          │
//! │                                                     │                   │
//! │           seed | category | product | addition | sale                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so that JSON written to stdout can be piped.
//!
//! ## Exit Status
//! - `0` success
//! - `1` storage, configuration or timeout failure (retrying may help)
//! - `2` the request itself was rejected (bad order, unknown id)

mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lanches_core::CoreError;
use lanches_db::{Database, DbError};

use crate::commands::{Cli, Context};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = &cli.database {
        config.database_path = path.clone();
    }

    init_tracing(&config.log_filter);

    info!(
        path = %config.database_path.display(),
        timeout_secs = config.operation_timeout_secs,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    let ctx = Context::new(db.clone(), config.operation_timeout());
    let outcome = commands::run(cli.command, &ctx).await;

    db.close().await;
    outcome
}

/// Maps a failed command to its exit status.
fn exit_status(err: &anyhow::Error) -> u8 {
    let rejected = if let Some(core) = err.downcast_ref::<CoreError>() {
        core.is_client_error()
    } else if let Some(db) = err.downcast_ref::<DbError>() {
        matches!(
            db,
            DbError::NotFound { .. }
                | DbError::UniqueViolation { .. }
                | DbError::ForeignKeyViolation { .. }
                | DbError::Validation(_)
        )
    } else {
        false
    };

    if rejected {
        2
    } else {
        1
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `log_filter` from the configuration
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_exit_status_separates_rejections_from_failures() {
        let rejected = anyhow::Error::from(CoreError::SaleNotFound(Uuid::new_v4()));
        assert_eq!(exit_status(&rejected), 2);

        let overflow = anyhow::Error::from(CoreError::AmountOverflow {
            context: "line total".to_string(),
        });
        assert_eq!(exit_status(&overflow), 2);

        let storage = anyhow::Error::from(CoreError::Storage("disk full".to_string()));
        assert_eq!(exit_status(&storage), 1);

        let missing = anyhow::Error::from(DbError::NotFound {
            entity: "Product".to_string(),
            id: Uuid::new_v4().to_string(),
        });
        assert_eq!(exit_status(&missing), 2);

        let timeout = anyhow::anyhow!("operation timed out after 5s");
        assert_eq!(exit_status(&timeout), 1);
    }

    #[test]
    fn test_exit_status_survives_added_context() {
        let err = anyhow::Error::from(CoreError::InvalidQuantity { quantity: 0 })
            .context("creating sale");
        assert_eq!(exit_status(&err), 2);
    }
}
