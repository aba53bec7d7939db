//! # Domain Types
//!
//! Core domain types used throughout Lanches POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (owned by the catalog store)                                  │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│     Product     │   │    Addition     │       │
//! │  │  id, name       │   │  category_id    │   │  name           │       │
//! │  │  description    │   │  price_cents>0  │   │  price_cents>=0 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Sale lifecycle (owned by the pricing engine and the sale store)       │
//! │                                                                         │
//! │   NewSale ──price_sale()──► PricedSale ──SaleStore::create()──► Sale   │
//! │   (client)                  (in memory)                  (persisted)   │
//! │                                                                         │
//! │   NewSaleItem               PricedSaleItem               SaleItem      │
//! │   AdditionRef               AdditionSnapshot             AdditionSnap. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Unit prices and add-on name/price are copied into the sale when it is
//! priced. Editing or deleting a catalog entry later never changes a sale
//! that was already written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A grouping of products (e.g. "Burgers", "Drinks").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new active category with a fresh id.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Category this product is listed under (mandatory).
    pub category_id: Uuid,

    /// Display name shown to the cashier.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Price in cents, strictly positive.
    pub price_cents: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new active product with a fresh id.
    pub fn new(category_id: Uuid, name: impl Into<String>, price_cents: i64) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            category_id,
            name: name.into(),
            description: None,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Addition
// =============================================================================

/// An optional paid extra attachable to a sale item (e.g. extra cheese).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Addition {
    pub id: Uuid,
    pub name: String,
    /// Price in cents, zero allowed (free extras).
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Addition {
    /// Creates a new active addition with a fresh id.
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        let now = Utc::now();
        Addition {
            id: Uuid::new_v4(),
            name: name.into(),
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Freezes the current name and price for embedding in a sale item.
    pub fn snapshot(&self) -> AdditionSnapshot {
        AdditionSnapshot {
            id: self.id,
            name: self.name.clone(),
            price_cents: self.price_cents,
        }
    }
}

/// An add-on as it was at the moment of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionSnapshot {
    pub id: Uuid,
    /// Name at time of sale (frozen).
    pub name: String,
    /// Price in cents at time of sale (frozen).
    pub price_cents: i64,
}

impl AdditionSnapshot {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Candidate Sale (client input)
// =============================================================================

/// A sale as submitted by a client, before pricing.
///
/// Only references and quantities are trusted. Totals are never read from
/// the client, and add-on entries carry nothing but an id: any `name` or
/// `price` field in the submitted JSON is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    /// Sale id to use; generated by the store when absent.
    #[serde(default)]
    pub id: Option<Uuid>,

    /// When the sale happened; defaults to the pricing time when absent.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub discount_cents: i64,

    #[serde(default)]
    pub additional_charges_cents: i64,

    #[serde(default)]
    pub items: Vec<NewSaleItem>,
}

/// One requested product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_id: Uuid,
    pub quantity: i64,
    #[serde(default)]
    pub additions: Vec<AdditionRef>,
}

/// A reference to a catalog add-on by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionRef {
    pub id: Uuid,
}

// =============================================================================
// Priced Sale (engine output)
// =============================================================================

/// A sale whose every price was resolved from the catalog, ready to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedSale {
    /// Caller-chosen id, if any.
    pub id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub discount_cents: i64,
    pub additional_charges_cents: i64,
    /// Σ item totals - discount + additional charges.
    pub total_cents: i64,
    pub items: Vec<PricedSaleItem>,
}

/// A priced product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedSaleItem {
    pub product_id: Uuid,
    pub quantity: i64,
    /// Catalog price at resolution time.
    pub unit_price_cents: i64,
    /// (unit price + Σ add-on prices) × quantity.
    pub total_price_cents: i64,
    pub additions: Vec<AdditionSnapshot>,
}

impl PricedSale {
    /// Builds the persisted form of this sale under `id`.
    ///
    /// Line-sequence ids are assigned 1..=n in item order. Both sale stores
    /// go through here so they agree on the shape of what they return.
    pub fn into_sale(self, id: Uuid) -> Sale {
        let items = self
            .items
            .into_iter()
            .zip(1_i64..)
            .map(|(item, item_id)| SaleItem {
                sale_id: id,
                item_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
                total_price_cents: item.total_price_cents,
                additions: item.additions,
            })
            .collect();

        Sale {
            id,
            date: self.date,
            total_cents: self.total_cents,
            discount_cents: self.discount_cents,
            additional_charges_cents: self.additional_charges_cents,
            items,
        }
    }
}

// =============================================================================
// Sale (persisted aggregate)
// =============================================================================

/// A persisted sale transaction with its items and add-on snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub total_cents: i64,
    pub discount_cents: i64,
    pub additional_charges_cents: i64,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Σ item totals, before discount and additional charges.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(SaleItem::total_price).sum()
    }
}

/// A line item in a persisted sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub sale_id: Uuid,
    /// Line-sequence id, unique within the sale.
    pub item_id: i64,
    pub product_id: Uuid,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub additions: Vec<AdditionSnapshot>,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
