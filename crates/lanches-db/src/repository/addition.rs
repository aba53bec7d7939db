//! # Addition Repository
//!
//! Database operations for add-ons (extra cheese, bacon, ...).
//!
//! Like products, additions are soft-deleted. Sales keep their own copy of
//! the name and price in `sale_item_additions`, so neither an edit nor a
//! delete here reaches a sale that was already written.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lanches_core::validation::validate_addition;
use lanches_core::Addition;

/// Repository for addition database operations.
#[derive(Debug, Clone)]
pub struct AdditionRepository {
    pool: SqlitePool,
}

impl AdditionRepository {
    /// Creates a new AdditionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdditionRepository { pool }
    }

    /// Gets an active addition by its ID.
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Addition>> {
        let addition = sqlx::query_as::<_, Addition>(
            r#"
            SELECT id, name, price_cents, is_active, created_at, updated_at
            FROM additions
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(addition)
    }

    /// Lists active additions, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Addition>> {
        let additions = sqlx::query_as::<_, Addition>(
            r#"
            SELECT id, name, price_cents, is_active, created_at, updated_at
            FROM additions
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(additions)
    }

    /// Inserts a new addition. Zero price is allowed.
    pub async fn insert(&self, addition: &Addition) -> DbResult<()> {
        validate_addition(addition)?;

        debug!(id = %addition.id, name = %addition.name, "Inserting addition");

        sqlx::query(
            r#"
            INSERT INTO additions (id, name, price_cents, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(addition.id)
        .bind(&addition.name)
        .bind(addition.price_cents)
        .bind(addition.is_active)
        .bind(addition.created_at)
        .bind(addition.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an active addition's name and price.
    pub async fn update(&self, addition: &Addition) -> DbResult<()> {
        validate_addition(addition)?;

        debug!(id = %addition.id, "Updating addition");

        let result = sqlx::query(
            r#"
            UPDATE additions SET
                name = ?2,
                price_cents = ?3,
                updated_at = ?4
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(addition.id)
        .bind(&addition.name)
        .bind(addition.price_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Addition", addition.id));
        }

        Ok(())
    }

    /// Soft-deletes an addition.
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting addition");

        let result = sqlx::query(
            r#"
            UPDATE additions SET
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
            return Err(DbError::not_found("Addition", id));
        }

        Ok(())
    }
}
