//! # Validation Module
//!
//! Input validation utilities for Lanches POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Ids parse as UUIDs, quantities and amounts as integers            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Catalog entries: name present, price sign                         │
//! │  └── Sales: nil references, discount/surcharge sign                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on prices and quantities                        │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lanches_core::validation::{validate_name, validate_product_price};
//!
//! assert!(validate_name("name", "X-Burger").is_ok());
//! assert!(validate_product_price(0).is_err());
//! ```

use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Addition, Category, Product};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog entry name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price: strictly positive.
pub fn validate_product_price(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that may be zero but never negative
/// (add-on prices, discounts, additional charges).
///
/// ## Example
/// ```rust
/// use lanches_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("discount", 0).is_ok());
/// assert!(validate_non_negative("discount", -100).is_err());
/// ```
pub fn validate_non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Reference Validators
// =============================================================================

/// Rejects the nil UUID used as a reference.
pub fn validate_reference(field: &str, id: Uuid) -> CoreResult<()> {
    if id.is_nil() {
        return Err(CoreError::invalid_reference(field));
    }

    Ok(())
}

/// Parses a UUID string.
///
/// ## Example
/// ```rust
/// use lanches_core::validation::parse_uuid;
///
/// assert!(parse_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_uuid("not-a-uuid").is_err());
/// ```
pub fn parse_uuid(id: &str) -> ValidationResult<Uuid> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a category before it is written.
pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_name("name", &category.name)
}

/// Validates a product before it is written.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("name", &product.name)?;
    validate_product_price(product.price_cents)?;
    if product.category_id.is_nil() {
        return Err(ValidationError::Required {
            field: "category_id".to_string(),
        });
    }
    Ok(())
}

/// Validates an addition before it is written.
pub fn validate_addition(addition: &Addition) -> ValidationResult<()> {
    validate_name("name", &addition.name)?;
    validate_non_negative("price", addition.price_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================
