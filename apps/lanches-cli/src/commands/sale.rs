//! Sale commands: create from an order file, show, list, delete.
//!
//! ## Order file
//! ```json
//! {
//!   "discount_cents": 0,
//!   "additional_charges_cents": 0,
//!   "items": [
//!     { "product_id": "…", "quantity": 2, "additions": [{ "id": "…" }] }
//!   ]
//! }
//! ```
//! Prices and totals are never read from the file.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Subcommand};
use uuid::Uuid;

use lanches_core::{NewSale, Sale};

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct SaleCommand {
    #[command(subcommand)]
    command: SaleSubcommand,
}

#[derive(Debug, Subcommand)]
enum SaleSubcommand {
    /// Price an order file against the catalog and store it
    Create { order: PathBuf },
    /// Print one sale as JSON
    Show { id: Uuid },
    /// One line per sale, most recent first
    List,
    /// Delete a sale with its items
    Delete { id: Uuid },
}

pub(crate) async fn run(command: SaleCommand, ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.db.sale_service();

    match command.command {
        SaleSubcommand::Create { order } => {
            let candidate = read_order(&order)?;
            let sale = ctx.bounded(service.price_and_create_sale(&candidate)).await?;
            println!("{}", serde_json::to_string_pretty(&sale)?);
        }
        SaleSubcommand::Show { id } => {
            let sale = ctx.bounded(service.get_sale(id)).await?;
            println!("{}", serde_json::to_string_pretty(&sale)?);
        }
        SaleSubcommand::List => {
            for sale in ctx.bounded(service.list_sales()).await? {
                println!("{}", summary(&sale));
            }
        }
        SaleSubcommand::Delete { id } => {
            ctx.bounded(service.delete_sale(id)).await?;
        }
    }
    Ok(())
}

fn read_order(path: &Path) -> anyhow::Result<NewSale> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading order file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing order file {}", path.display()))
}

fn summary(sale: &Sale) -> String {
    format!(
        "{}  {}  {:>3} item(s)  {:>10}",
        sale.id,
        sale.date.format("%Y-%m-%d %H:%M"),
        sale.items.len(),
        sale.total().to_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_read_order_ignores_client_prices() {
        let product_id = Uuid::new_v4();
        let path = std::env::temp_dir().join(format!("order-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            format!(
                r#"{{ "total_amount": 1, "items": [{{ "product_id": "{product_id}", "quantity": 3, "unit_price": 1 }}] }}"#
            ),
        )
        .unwrap();

        let order = read_order(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, product_id);
        assert_eq!(order.items[0].quantity, 3);
    }

    #[test]
    fn test_read_order_missing_file() {
        let err = read_order(Path::new("/nonexistent/order.json")).unwrap_err();
        assert!(err.to_string().contains("reading order file"));
    }

    #[test]
    fn test_summary() {
        let sale = Sale {
            id: Uuid::nil(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            total_cents: 4000,
            discount_cents: 0,
            additional_charges_cents: 0,
            items: Vec::new(),
        };
        assert_eq!(
            summary(&sale),
            "00000000-0000-0000-0000-000000000000  2024-05-01 12:30    0 item(s)       40.00"
        );
    }
}
