//! # lanches-core: Pure Business Logic for Lanches POS
//!
//! This crate is the **heart** of Lanches POS. It prices sales against the
//! catalog and defines the seams the storage layer plugs into, without doing
//! any I/O itself.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Lanches POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lanches-cli (operator)                       │   │
//! │  │      seed, product add, sale create order.json, sale list       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ lanches-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  service  │  │ validation│  │   │
//! │  │   │  Product  │  │ price_sale│  │SaleService│  │   rules   │  │   │
//! │  │   │   Sale    │  │           │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                        │              │                        │   │
//! │  │               CatalogResolver     SaleStore   (traits)         │   │
//! │  └────────────────────────┼──────────────┼────────────────────────┘   │
//! │                           │              │                             │
//! │  ┌────────────────────────▼──────────────▼────────────────────────┐   │
//! │  │                    lanches-db (Database Layer)                  │   │
//! │  │        SqliteCatalog, SaleRepository, catalog repositories      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Addition, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`catalog`] - The catalog snapshot resolver seam
//! - [`pricing`] - The sale pricing engine
//! - [`store`] - The sale aggregate store seam
//! - [`service`] - The surface callers use to create and manage sales
//! - [`memory`] - In-memory resolver and store
//!
//! ## Example Usage
//!
//! ```rust
//! use lanches_core::money::Money;
//!
//! let burger = Money::from_cents(1000);
//! let bacon = Money::from_cents(250);
//!
//! // (unit price + add-ons) × quantity
//! let line_total = (burger + bacon) * 2_i64;
//! assert_eq!(line_total.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod memory;
pub mod money;
pub mod pricing;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogError, CatalogResolver};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::price_sale;
pub use service::SaleService;
pub use store::SaleStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a catalog entry name.
pub const MAX_NAME_LENGTH: usize = 200;
