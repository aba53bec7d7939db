//! # Sale Service
//!
//! The surface outer layers call to create and manage sales.
//!
//! ## Create Flow
//! ```text
//! NewSale ──► price_sale(catalog) ──► PricedSale ──► store.create() ──► Sale
//!                   │                                      │
//!                   └── any pricing error returns here,    └── one transaction
//!                       the store is never called
//! ```

use tracing::info;
use uuid::Uuid;

use crate::catalog::CatalogResolver;
use crate::error::{CoreError, CoreResult};
use crate::pricing::price_sale;
use crate::store::SaleStore;
use crate::types::{NewSale, Sale};
use crate::validation::validate_reference;

/// Prices sales against a catalog and keeps them in a store.
#[derive(Debug, Clone)]
pub struct SaleService<C, S> {
    catalog: C,
    store: S,
}

impl<C, S> SaleService<C, S>
where
    C: CatalogResolver,
    S: SaleStore,
{
    /// Creates a new SaleService.
    pub fn new(catalog: C, store: S) -> Self {
        SaleService { catalog, store }
    }

    /// Returns the catalog this service prices against.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prices the candidate and stores it as one atomic write.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - persisted sale with id and line-sequence ids
    /// * `Err(CoreError::Storage)` - the write was rolled back; safe to retry
    /// * any other `Err` - input defect, nothing was written
    pub async fn price_and_create_sale(&self, candidate: &NewSale) -> CoreResult<Sale> {
        let priced = price_sale(candidate, &self.catalog).await?;
        let sale = self.store.create(&priced).await?;

        info!(
            sale_id = %sale.id,
            items = sale.items.len(),
            total = %sale.total(),
            "Sale created"
        );
        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_sale(&self, id: Uuid) -> CoreResult<Sale> {
        validate_reference("sale_id", id)?;

        self.store
            .get_by_id(id)
            .await?
            .ok_or(CoreError::SaleNotFound(id))
    }

    /// Lists all sales, most recent first.
    pub async fn list_sales(&self) -> CoreResult<Vec<Sale>> {
        self.store.list().await
    }

    /// Deletes a sale with its items and add-on rows.
    pub async fn delete_sale(&self, id: Uuid) -> CoreResult<()> {
        validate_reference("sale_id", id)?;

        self.store.delete(id).await?;
        info!(sale_id = %id, "Sale deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
