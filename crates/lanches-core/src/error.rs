//! # Error Types
//!
//! Domain-specific error types for lanches-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lanches-core errors (this file)                                       │
//! │  ├── CoreError        - Pricing, lookup and storage outcomes           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lanches-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing vs Storage
//! Every variant except [`CoreError::Storage`] describes a defect in the
//! caller's input and is detected before anything is written. `Storage`
//! is only ever reported after the store rolled back, so retrying the same
//! request is safe.

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A nil identifier was supplied where a product, add-on or sale was
    /// expected.
    #[error("{field} must reference an existing entity, got the nil id")]
    InvalidReference { field: String },

    /// Item quantity is zero or negative.
    #[error("Quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// A line or sale total does not fit in the money representation.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// Product cannot be resolved from the catalog.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist in the catalog
    /// - Product was deleted (soft delete)
    /// - The catalog lookup itself failed
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Add-on cannot be resolved from the catalog.
    #[error("Addition not found: {0}")]
    AdditionNotFound(Uuid),

    /// Sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(Uuid),

    /// The store could not begin, execute or commit its transaction.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidReference error for the named field.
    pub fn invalid_reference(field: impl Into<String>) -> Self {
        CoreError::InvalidReference {
            field: field.into(),
        }
    }

    /// Returns true for outcomes caused by the caller's input rather than
    /// by the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::Storage(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
