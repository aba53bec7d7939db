//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► catalog repositories return DbError directly                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError ← SaleStore implementations                                 │
//! │    NotFound { entity: "Sale" } → CoreError::SaleNotFound               │
//! │    everything else             → CoreError::Storage                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lanches_core::{CatalogError, CoreError, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - ID doesn't exist
    /// - Soft-deleted record
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting an id that already exists
    /// - The same addition twice on one sale item
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Product referencing a non-existent category
    /// - Deleting a category that still has products
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not begin or commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Entity rejected before reaching SQL.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Wraps a failed BEGIN/COMMIT.
    pub fn transaction(err: sqlx::Error) -> Self {
        DbError::TransactionFailed(err.to_string())
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite error messages for constraints:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // PRIMARY KEY constraint reports the same way
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Store outcomes as the pricing layer sees them.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { ref entity, ref id } if entity == "Sale" => {
                match Uuid::parse_str(id) {
                    Ok(id) => CoreError::SaleNotFound(id),
                    Err(_) => CoreError::Storage(err.to_string()),
                }
            }
            DbError::Validation(e) => CoreError::Validation(e),
            other => CoreError::Storage(other.to_string()),
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(err: DbError) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_not_found_maps_to_core() {
        let id = Uuid::new_v4();
        let core: CoreError = DbError::not_found("Sale", id).into();
        assert!(matches!(core, CoreError::SaleNotFound(found) if found == id));
    }

    #[test]
    fn test_other_errors_map_to_storage() {
        let core: CoreError = DbError::not_found("Product", Uuid::new_v4()).into();
        assert!(matches!(core, CoreError::Storage(_)));

        let core: CoreError = DbError::PoolExhausted.into();
        assert!(matches!(core, CoreError::Storage(msg) if msg == "Connection pool exhausted"));
    }

    #[test]
    fn test_error_messages() {
        let err = DbError::not_found("Sale", "abc");
        assert_eq!(err.to_string(), "Sale not found: abc");
    }
}
