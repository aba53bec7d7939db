//! # In-Memory Collaborators
//!
//! [`CatalogResolver`] and [`SaleStore`] implementations backed by plain
//! collections. They follow the same contracts as the SQLite versions in
//! lanches-db (id assignment, ordering, not-found handling) so the pricing
//! engine and [`crate::SaleService`] can be exercised without a database.
//!
//! ## Thread Safety
//! State sits behind `std::sync` locks; every method holds a lock only for
//! the duration of one collection operation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::{CatalogError, CatalogResolver};
use crate::error::{CoreError, CoreResult};
use crate::store::SaleStore;
use crate::types::{Addition, PricedSale, Product, Sale};

// =============================================================================
// Catalog
// =============================================================================

/// Catalog held in hash maps.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<Uuid, Product>>,
    additions: RwLock<HashMap<Uuid, Addition>>,
    unavailable: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a product.
    pub fn insert_product(&self, product: Product) {
        self.products
            .write()
            .expect("Catalog lock poisoned")
            .insert(product.id, product);
    }

    /// Inserts or replaces an addition.
    pub fn insert_addition(&self, addition: Addition) {
        self.additions
            .write()
            .expect("Catalog lock poisoned")
            .insert(addition.id, addition);
    }

    /// Makes every lookup fail with [`CatalogError::Storage`] while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("in-memory catalog offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogResolver for InMemoryCatalog {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
        self.check_available()?;
        let products = self.products.read().expect("Catalog lock poisoned");
        Ok(products.get(&id).filter(|p| p.is_active).cloned())
    }

    async fn resolve_addition(&self, id: Uuid) -> Result<Option<Addition>, CatalogError> {
        self.check_available()?;
        let additions = self.additions.read().expect("Catalog lock poisoned");
        Ok(additions.get(&id).filter(|a| a.is_active).cloned())
    }
}

// =============================================================================
// Sale Store
// =============================================================================

/// Sale store held in a vector, in insertion order.
#[derive(Debug, Default)]
pub struct InMemorySaleStore {
    sales: Mutex<Vec<Sale>>,
    create_calls: AtomicUsize,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `create` was called, successful or not.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of stored sales.
    pub fn len(&self) -> usize {
        self.sales.lock().expect("Sale store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn create(&self, sale: &PricedSale) -> CoreResult<Sale> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        // Mirrors the (sale, item, addition) primary key of the SQL store.
        for item in &sale.items {
            let mut seen = HashSet::new();
            if let Some(dup) = item.additions.iter().find(|a| !seen.insert(a.id)) {
                return Err(CoreError::Storage(format!(
                    "addition {} appears twice on one item",
                    dup.id
                )));
            }
        }

        let id = sale.id.unwrap_or_else(Uuid::new_v4);
        let mut sales = self.sales.lock().expect("Sale store lock poisoned");
        if sales.iter().any(|s| s.id == id) {
            return Err(CoreError::Storage(format!("sale {id} already exists")));
        }

        let persisted = sale.clone().into_sale(id);
        sales.push(persisted.clone());
        Ok(persisted)
    }

    async fn get_by_id(&self, id: Uuid) -> CoreResult<Option<Sale>> {
        let sales = self.sales.lock().expect("Sale store lock poisoned");
        Ok(sales.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> CoreResult<Vec<Sale>> {
        let mut sales = self.sales.lock().expect("Sale store lock poisoned").clone();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sales)
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        let mut sales = self.sales.lock().expect("Sale store lock poisoned");
        let before = sales.len();
        sales.retain(|s| s.id != id);
        if sales.len() == before {
            return Err(CoreError::SaleNotFound(id));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdditionSnapshot, PricedSaleItem};
    use chrono::{Duration, Utc};

    fn priced(id: Option<Uuid>, days_ago: i64) -> PricedSale {
        PricedSale {
            id,
            date: Utc::now() - Duration::days(days_ago),
            discount_cents: 0,
            additional_charges_cents: 0,
            total_cents: 0,
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_catalog_hides_inactive_entries() {
        let catalog = InMemoryCatalog::new();
        let mut fries = Addition::new("Batata", 500);
        fries.is_active = false;
        catalog.insert_addition(fries.clone());

        assert!(catalog.resolve_addition(fries.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_assigns_or_keeps_id() {
        let store = InMemorySaleStore::new();
        let chosen = Uuid::new_v4();

        let kept = store.create(&priced(Some(chosen), 0)).await.unwrap();
        assert_eq!(kept.id, chosen);

        let generated = store.create(&priced(None, 0)).await.unwrap();
        assert!(!generated.id.is_nil());
        assert_ne!(generated.id, chosen);

        assert!(store.create(&priced(Some(chosen), 0)).await.is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.create_calls(), 3);
    }

    #[tokio::test]
    async fn test_store_lists_most_recent_first() {
        let store = InMemorySaleStore::new();
        let old = store.create(&priced(None, 3)).await.unwrap();
        let new = store.create(&priced(None, 1)).await.unwrap();

        let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
    }

    #[tokio::test]
    async fn test_store_delete_missing() {
        let store = InMemorySaleStore::new();
        let sale = store.create(&priced(None, 0)).await.unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            store.delete(missing).await,
            Err(CoreError::SaleNotFound(id)) if id == missing
        ));
        assert_eq!(store.len(), 1);

        store.delete(sale.id).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_rejects_duplicate_addition_on_one_item() {
        let store = InMemorySaleStore::new();
        let bacon = AdditionSnapshot {
            id: Uuid::new_v4(),
            name: "Bacon".to_string(),
            price_cents: 250,
        };
        let mut sale = priced(None, 0);
        sale.items.push(PricedSaleItem {
            product_id: Uuid::new_v4(),
            quantity: 1,
            unit_price_cents: 1000,
            total_price_cents: 1500,
            additions: vec![bacon.clone(), bacon],
        });

        let err = store.create(&sale).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(store.is_empty());
    }
}
