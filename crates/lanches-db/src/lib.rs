//! # lanches-db: Database Layer for Lanches POS
//!
//! This crate provides database access for the Lanches POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lanches POS Data Flow                            │
//! │                                                                         │
//! │  lanches sale create order.json                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleService (lanches-core)                                            │
//! │       │ resolve prices            │ store aggregate                    │
//! │       ▼                           ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lanches-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │ AdditionRepo  │    │   schema.sql │  │   │
//! │  │   │ Management    │    │ SaleRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │            ▲                                                    │   │
//! │  │            └── SqliteCatalog (catalog.rs)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     lanches.db                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, sale)
//! - [`catalog`] - `CatalogResolver` over the catalog repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lanches_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lanches.db")).await?;
//!
//! let sale = db.sale_service().price_and_create_sale(&order).await?;
//! let recent = db.sales().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::SqliteCatalog;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::addition::AdditionRepository;
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
