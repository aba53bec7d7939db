//! # Sale Aggregate Store
//!
//! Persistence seam for priced sales. The SQLite implementation is
//! `lanches_db::SaleRepository`; [`crate::memory::InMemorySaleStore`] backs
//! the unit tests.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(priced)  header + items + add-on rows, all or nothing          │
//! │                  → Sale with id and line-sequence ids assigned          │
//! │                                                                         │
//! │  get_by_id(id)   Ok(None) when there is no such sale                   │
//! │                                                                         │
//! │  list()          every sale, most recent date first                    │
//! │                                                                         │
//! │  delete(id)      add-on rows, items, header in one transaction         │
//! │                  Err(SaleNotFound) and nothing removed when absent      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping a returned future before it completes must leave no partial
//! write behind.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::types::{PricedSale, Sale};

/// Durable storage for sale aggregates.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Writes the whole aggregate atomically and returns its persisted form.
    async fn create(&self, sale: &PricedSale) -> CoreResult<Sale>;

    /// Reconstructs one sale, or `None` if it does not exist.
    async fn get_by_id(&self, id: Uuid) -> CoreResult<Option<Sale>>;

    /// Reconstructs every sale, ordered by date descending.
    async fn list(&self) -> CoreResult<Vec<Sale>>;

    /// Removes a sale with its items and add-on rows.
    async fn delete(&self, id: Uuid) -> CoreResult<()>;
}
