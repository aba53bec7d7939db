//! # Sale Repository
//!
//! SQLite implementation of the sale aggregate store.
//!
//! ## Aggregate Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One sale, three tables                            │
//! │                                                                         │
//! │  sales                 id, date, total, discount, additional charges   │
//! │    │                                                                    │
//! │    └── sale_items      (sale_id, item_id 1..n), product, qty, prices    │
//! │          │                                                              │
//! │          └── sale_item_additions                                        │
//! │                        (sale_id, item_id, addition_id),                 │
//! │                        name_snapshot, price_cents_snapshot              │
//! │                                                                         │
//! │  insert(): header → items → add-on rows, one transaction               │
//! │  delete(): add-on rows → items → header, one transaction               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rollback
//! Every write goes through a `sqlx::Transaction`. An early return on `?`
//! drops the transaction, and so does cancelling the future (for example when
//! a caller's `tokio::time::timeout` fires). Either way SQLite rolls back and
//! no partial aggregate is ever visible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lanches_core::{AdditionSnapshot, CoreResult, PricedSale, Sale, SaleItem, SaleStore};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: Uuid,
    date: DateTime<Utc>,
    total_cents: i64,
    discount_cents: i64,
    additional_charges_cents: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    sale_id: Uuid,
    item_id: i64,
    product_id: Uuid,
    quantity: i64,
    unit_price_cents: i64,
    total_price_cents: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleItemAdditionRow {
    item_id: i64,
    addition_id: Uuid,
    name: String,
    price_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Writes a priced sale with all its items and add-on rows.
    ///
    /// Uses the sale's own id when it has one, otherwise a fresh UUID v4.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - sale id already taken, or the same
    ///   add-on twice on one item
    /// * `DbError::ForeignKeyViolation` - product or add-on row is missing
    /// * `DbError::TransactionFailed` - BEGIN or COMMIT failed
    ///
    /// Nothing is written in any error case.
    pub async fn insert(&self, priced: &PricedSale) -> DbResult<Sale> {
        let id = priced.id.unwrap_or_else(Uuid::new_v4);
        let sale = priced.clone().into_sale(id);

        debug!(sale_id = %id, items = sale.items.len(), "Inserting sale");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, date, total_cents, discount_cents, additional_charges_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sale.id)
        .bind(sale.date)
        .bind(sale.total_cents)
        .bind(sale.discount_cents)
        .bind(sale.additional_charges_cents)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, item_id, product_id, quantity,
                    unit_price_cents, total_price_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(item.sale_id)
            .bind(item.item_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.total_price_cents)
            .execute(&mut *tx)
            .await?;

            for addition in &item.additions {
                sqlx::query(
                    r#"
                    INSERT INTO sale_item_additions (
                        sale_id, item_id, addition_id,
                        name_snapshot, price_cents_snapshot
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )
                .bind(item.sale_id)
                .bind(item.item_id)
                .bind(addition.id)
                .bind(&addition.name)
                .bind(addition.price_cents)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(sale_id = %id, "Sale committed");
        Ok(sale)
    }

    /// Gets a sale by ID with its items and add-on snapshots.
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, date, total_cents, discount_cents, additional_charges_cents
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.load(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists every sale, most recent first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, date, total_cents, discount_cents, additional_charges_cents
            FROM sales
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            sales.push(self.load(row).await?);
        }

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Deletes a sale: add-on rows, then items, then the header.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no such sale; the transaction is rolled back
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(sale_id = %id, "Deleting sale");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query("DELETE FROM sale_item_additions WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(DbError::transaction)?;
            return Err(DbError::not_found("Sale", id));
        }

        tx.commit().await.map_err(DbError::transaction)?;
        Ok(())
    }

    /// Rebuilds the aggregate behind a header row.
    async fn load(&self, row: SaleRow) -> DbResult<Sale> {
        let item_rows = sqlx::query_as::<_, SaleItemRow>(
            r#"
            SELECT
                sale_id, item_id, product_id, quantity,
                unit_price_cents, total_price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY item_id
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        // Snapshot columns, not the live catalog values
        let addition_rows = sqlx::query_as::<_, SaleItemAdditionRow>(
            r#"
            SELECT
                sia.item_id,
                sia.addition_id,
                sia.name_snapshot AS name,
                sia.price_cents_snapshot AS price_cents
            FROM sale_item_additions sia
            INNER JOIN additions a ON a.id = sia.addition_id
            WHERE sia.sale_id = ?1
            ORDER BY sia.item_id, sia.rowid
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(|item| SaleItem {
                sale_id: item.sale_id,
                item_id: item.item_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
                total_price_cents: item.total_price_cents,
                additions: addition_rows
                    .iter()
                    .filter(|a| a.item_id == item.item_id)
                    .map(|a| AdditionSnapshot {
                        id: a.addition_id,
                        name: a.name.clone(),
                        price_cents: a.price_cents,
                    })
                    .collect(),
            })
            .collect();

        Ok(Sale {
            id: row.id,
            date: row.date,
            total_cents: row.total_cents,
            discount_cents: row.discount_cents,
            additional_charges_cents: row.additional_charges_cents,
            items,
        })
    }
}

// =============================================================================
// SaleStore
// =============================================================================

#[async_trait]
impl SaleStore for SaleRepository {
    async fn create(&self, sale: &PricedSale) -> CoreResult<Sale> {
        Ok(self.insert(sale).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> CoreResult<Option<Sale>> {
        Ok(SaleRepository::get_by_id(self, id).await?)
    }

    async fn list(&self) -> CoreResult<Vec<Sale>> {
        Ok(SaleRepository::list(self).await?)
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        Ok(SaleRepository::delete(self, id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
