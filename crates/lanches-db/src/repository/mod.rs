//! # Repository Module
//!
//! Database repository implementations for Lanches POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.products().list()                                          │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, product)                                            │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── update(&self, product)                                            │
//! │  ├── delete(&self, id)                                                 │
//! │  └── list(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SaleRepository also implements lanches_core::SaleStore, so the        │
//! │  SaleService can run against it or against the in-memory store.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD (hard delete)
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD (soft delete)
//! - [`AdditionRepository`](addition::AdditionRepository) - Add-on CRUD (soft delete)
//! - [`SaleRepository`](sale::SaleRepository) - Sale aggregate store

pub mod addition;
pub mod category;
pub mod product;
pub mod sale;
