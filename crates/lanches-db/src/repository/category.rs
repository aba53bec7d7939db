//! # Category Repository
//!
//! Database operations for product categories.
//!
//! Categories are hard-deleted. The `products.category_id` foreign key
//! refuses the delete while any product (active or not) still points at the
//! category, and that refusal surfaces as [`DbError::ForeignKeyViolation`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lanches_core::validation::validate_category;
use lanches_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Inserts a new category.
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        validate_category(category)?;

        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates name, description and active flag.
    pub async fn update(&self, category: &Category) -> DbResult<()> {
        validate_category(category)?;

        debug!(id = %category.id, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?2,
                description = ?3,
                is_active = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", category.id));
        }

        Ok(())
    }

    /// Deletes a category that no product references.
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use lanches_core::{Category, Product, ValidationError};
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_get_list() {
        let db = test_db().await;
        let repo = db.categories();

        let drinks = Category::new("Drinks", None);
        let burgers = Category::new("Burgers", Some("Grilled".to_string()));
        repo.insert(&drinks).await.unwrap();
        repo.insert(&burgers).await.unwrap();

        let found = repo.get_by_id(burgers.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Burgers");
        assert_eq!(found.description.as_deref(), Some("Grilled"));

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Burgers", "Drinks"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_name() {
        let db = test_db().await;
        let err = db.categories().insert(&Category::new("  ", None)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::Required { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let db = test_db().await;
        let err = db.categories().update(&Category::new("Ghost", None)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_refused_while_referenced() {
        let db = test_db().await;
        let category = Category::new("Burgers", None);
        db.categories().insert(&category).await.unwrap();
        db.products()
            .insert(&Product::new(category.id, "X-Burger", 1000))
            .await
            .unwrap();

        let err = db.categories().delete(category.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(db.categories().get_by_id(category.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let category = Category::new("Desserts", None);
        db.categories().insert(&category).await.unwrap();

        db.categories().delete(category.id).await.unwrap();
        assert!(db.categories().get_by_id(category.id).await.unwrap().is_none());

        let err = db.categories().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
