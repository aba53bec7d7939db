//! # SQLite Catalog Resolver
//!
//! [`CatalogResolver`] backed by the product and addition repositories.
//! Soft-deleted entries resolve to `None`, the same as ids that never existed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::repository::addition::AdditionRepository;
use crate::repository::product::ProductRepository;
use lanches_core::{Addition, CatalogError, CatalogResolver, Product};

/// Resolves current catalog prices from SQLite.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    products: ProductRepository,
    additions: AdditionRepository,
}

impl SqliteCatalog {
    pub fn new(products: ProductRepository, additions: AdditionRepository) -> Self {
        SqliteCatalog {
            products,
            additions,
        }
    }
}

#[async_trait]
impl CatalogResolver for SqliteCatalog {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.get_by_id(id).await?)
    }

    async fn resolve_addition(&self, id: Uuid) -> Result<Option<Addition>, CatalogError> {
        Ok(self.additions.get_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use lanches_core::Category;

    #[tokio::test]
    async fn test_resolves_active_entries_only() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = Category::new("Burgers", None);
        db.categories().insert(&category).await.unwrap();
        let burger = Product::new(category.id, "X-Burger", 1000);
        db.products().insert(&burger).await.unwrap();
        let bacon = Addition::new("Bacon", 250);
        db.additions().insert(&bacon).await.unwrap();

        let catalog = db.catalog();
        assert_eq!(catalog.resolve_product(burger.id).await.unwrap().unwrap().price_cents, 1000);
        assert_eq!(catalog.resolve_addition(bacon.id).await.unwrap().unwrap().name, "Bacon");
        assert!(catalog.resolve_product(Uuid::new_v4()).await.unwrap().is_none());

        db.additions().delete(bacon.id).await.unwrap();
        assert!(catalog.resolve_addition(bacon.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_is_an_error_not_a_miss() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        db.close().await;

        let err = catalog.resolve_product(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
