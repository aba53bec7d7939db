//! # Catalog Snapshot Resolver
//!
//! The one thing the pricing engine needs from the catalog: the current
//! name and price of a product or add-on, by id.
//!
//! ```text
//!   price_sale() ──resolve_product(id)──►  CatalogResolver
//!                ──resolve_addition(id)─►   ├── SqliteCatalog   (lanches-db)
//!                                           └── InMemoryCatalog (memory.rs)
//! ```
//!
//! Implementations return `Ok(None)` when the entry does not exist (or was
//! soft-deleted) and `Err` only when the lookup itself failed, so callers can
//! tell the two apart in their logs even though pricing treats both as
//! not-found.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{Addition, Product};

/// A catalog lookup that could not be answered.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Storage(String),
}

/// Read access to the authoritative catalog.
#[async_trait]
pub trait CatalogResolver: Send + Sync {
    /// Returns the active product with this id, if any.
    async fn resolve_product(&self, id: Uuid) -> Result<Option<Product>, CatalogError>;

    /// Returns the active addition with this id, if any.
    async fn resolve_addition(&self, id: Uuid) -> Result<Option<Addition>, CatalogError>;
}
