//! Command definitions and dispatch.
//!
//! Every command receives a [`Context`]; store-touching calls go through
//! [`Context::bounded`] so none of them can hang past the configured timeout.
//! When the deadline fires the in-flight future is dropped, and with it any
//! open sqlx transaction, which SQLite rolls back.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::{Parser, Subcommand};

use lanches_db::Database;

mod catalog;
mod sale;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "lanches", about = "Lanches POS sale engine", version)]
pub(crate) struct Cli {
    /// TOML configuration file (defaults to ./lanches.toml when present)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(long = "db", global = true)]
    pub(crate) database: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Insert a sample catalog into an empty database
    Seed,
    Category(catalog::CategoryCommand),
    Product(catalog::ProductCommand),
    Addition(catalog::AdditionCommand),
    Sale(sale::SaleCommand),
}

pub(crate) async fn run(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Seed => seed::run(ctx).await,
        Commands::Category(command) => catalog::run_category(command, ctx).await,
        Commands::Product(command) => catalog::run_product(command, ctx).await,
        Commands::Addition(command) => catalog::run_addition(command, ctx).await,
        Commands::Sale(command) => sale::run(command, ctx).await,
    }
}

/// What every command gets to work with.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub(crate) db: Database,
    timeout: Duration,
}

impl Context {
    pub(crate) fn new(db: Database, timeout: Duration) -> Self {
        Context { db, timeout }
    }

    /// Awaits `operation`, giving up after the configured timeout.
    pub(crate) async fn bounded<T, E, F>(&self, operation: F) -> anyhow::Result<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => bail!("operation timed out after {:?}", self.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanches_db::DbConfig;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctx = Context::new(db, Duration::from_secs(5));

        let categories = ctx.bounded(ctx.db.categories().list()).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctx = Context::new(db, Duration::from_millis(10));

        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, std::io::Error>(())
        };
        let err = ctx.bounded(slow).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_cli_parses_sale_create() {
        let cli = Cli::try_parse_from(["lanches", "--db", "pos.db", "sale", "create", "order.json"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("pos.db")));
        assert!(matches!(cli.command, Commands::Sale(_)));
    }
}
