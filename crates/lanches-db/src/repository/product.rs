//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Soft Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why products are never DELETEd                       │
//! │                                                                         │
//! │  sale_items.product_id ──FK──► products.id                             │
//! │                                                                         │
//! │  delete(id) sets is_active = 0:                                        │
//! │    • get_by_id / list stop returning it                                │
//! │    • the pricing engine can no longer resolve it (ProductNotFound)      │
//! │    • historic sales keep a valid foreign key and their unit price      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lanches_core::validation::validate_product;
use lanches_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// repo.insert(&Product::new(category_id, "X-Burger", 1000)).await?;
/// let product = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets an active product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found or soft-deleted
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                category_id,
                name,
                description,
                price_cents,
                is_active,
                created_at,
                updated_at
            FROM products
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists active products, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                category_id,
                name,
                description,
                price_cents,
                is_active,
                created_at,
                updated_at
            FROM products
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists active products of one category, ordered by name.
    pub async fn list_by_category(&self, category_id: Uuid) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                category_id,
                name,
                description,
                price_cents,
                is_active,
                created_at,
                updated_at
            FROM products
            WHERE category_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// * `DbError::Validation` - blank name, price not > 0
    /// * `DbError::ForeignKeyViolation` - unknown category
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, category_id, name, description, price_cents,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an active product.
    ///
    /// Sales already written keep the price they were sold at.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;

        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                category_id = ?2,
                name = ?3,
                description = ?4,
                price_cents = ?5,
                updated_at = ?6
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product.
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                is_active = 0,
                updated_at = ?2
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
