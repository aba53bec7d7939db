//! # Sale Pricing Engine
//!
//! Turns a client-submitted [`NewSale`] into a [`PricedSale`] whose every
//! price comes from the catalog.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each item, in submission order:                                    │
//! │                                                                         │
//! │    product_id nil? ───────────────────────► InvalidReference           │
//! │    resolve_product(product_id)                                          │
//! │       └── absent or lookup failed ────────► ProductNotFound            │
//! │    quantity <= 0? ────────────────────────► InvalidQuantity            │
//! │    for each add-on id, in submission order:                            │
//! │       nil? ───────────────────────────────► InvalidReference           │
//! │       resolve_addition(id)                                              │
//! │          └── absent or lookup failed ─────► AdditionNotFound           │
//! │       keep snapshot (id, name, price)                                   │
//! │    line total = (unit price + Σ add-on prices) × quantity               │
//! │       └── does not fit in i64 cents ──────► AmountOverflow             │
//! │                                                                         │
//! │  total = Σ line totals - discount + additional charges                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failure aborts the whole sale. The candidate is only read;
//! the priced sale is a new value.

use chrono::Utc;
use tracing::{debug, warn};

use crate::catalog::CatalogResolver;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AdditionSnapshot, NewSale, NewSaleItem, PricedSale, PricedSaleItem};
use crate::validation::{validate_non_negative, validate_reference};

/// Prices a candidate sale against the catalog.
///
/// ## Returns
/// * `Ok(PricedSale)` - every reference resolved, totals computed
/// * `Err(CoreError)` - the first input defect found; nothing was written
///
/// ## Example
/// ```rust,ignore
/// let priced = price_sale(&candidate, &catalog).await?;
/// let sale = store.create(&priced).await?;
/// ```
pub async fn price_sale<C>(candidate: &NewSale, catalog: &C) -> CoreResult<PricedSale>
where
    C: CatalogResolver + ?Sized,
{
    validate_non_negative("discount", candidate.discount_cents)?;
    validate_non_negative("additional_charges", candidate.additional_charges_cents)?;

    let mut items = Vec::with_capacity(candidate.items.len());
    for item in &candidate.items {
        items.push(price_item(item, catalog).await?);
    }

    let subtotal = items
        .iter()
        .try_fold(Money::zero(), |acc, item| {
            acc.checked_add(Money::from_cents(item.total_price_cents))
        })
        .ok_or_else(|| overflow("sale subtotal"))?;
    let total = subtotal
        .checked_sub(Money::from_cents(candidate.discount_cents))
        .and_then(|t| t.checked_add(Money::from_cents(candidate.additional_charges_cents)))
        .ok_or_else(|| overflow("sale total"))?;

    debug!(
        items = items.len(),
        subtotal = %subtotal,
        total = %total,
        "Sale priced"
    );

    Ok(PricedSale {
        id: candidate.id,
        date: candidate.date.unwrap_or_else(Utc::now),
        discount_cents: candidate.discount_cents,
        additional_charges_cents: candidate.additional_charges_cents,
        total_cents: total.cents(),
        items,
    })
}

async fn price_item<C>(item: &NewSaleItem, catalog: &C) -> CoreResult<PricedSaleItem>
where
    C: CatalogResolver + ?Sized,
{
    validate_reference("product_id", item.product_id)?;

    let product = match catalog.resolve_product(item.product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(CoreError::ProductNotFound(item.product_id)),
        Err(e) => {
            warn!(product_id = %item.product_id, error = %e, "Product lookup failed");
            return Err(CoreError::ProductNotFound(item.product_id));
        }
    };

    if item.quantity <= 0 {
        return Err(CoreError::InvalidQuantity {
            quantity: item.quantity,
        });
    }

    let mut additions = Vec::with_capacity(item.additions.len());
    for reference in &item.additions {
        validate_reference("addition_id", reference.id)?;

        let addition = match catalog.resolve_addition(reference.id).await {
            Ok(Some(addition)) => addition,
            Ok(None) => return Err(CoreError::AdditionNotFound(reference.id)),
            Err(e) => {
                warn!(addition_id = %reference.id, error = %e, "Addition lookup failed");
                return Err(CoreError::AdditionNotFound(reference.id));
            }
        };
        additions.push(addition.snapshot());
    }

    let unit_price = product.price();
    let total_price = additions
        .iter()
        .map(AdditionSnapshot::price)
        .try_fold(unit_price, |acc, price| acc.checked_add(price))
        .and_then(|each| each.checked_multiply_quantity(item.quantity))
        .ok_or_else(|| overflow("line total"))?;

    Ok(PricedSaleItem {
        product_id: product.id,
        quantity: item.quantity,
        unit_price_cents: unit_price.cents(),
        total_price_cents: total_price.cents(),
        additions,
    })
}

fn overflow(context: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: context.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;
    use crate::types::{Addition, AdditionRef, Product};
    use chrono::TimeZone;
    use uuid::Uuid;

    struct Fixture {
        catalog: InMemoryCatalog,
        burger: Product,
        bacon: Addition,
        cheddar: Addition,
    }

    fn fixture() -> Fixture {
        let catalog = InMemoryCatalog::new();
        let burger = Product::new(Uuid::new_v4(), "X-Burger", 1000);
        let bacon = Addition::new("Bacon", 250);
        let cheddar = Addition::new("Cheddar", 250);
        catalog.insert_product(burger.clone());
        catalog.insert_addition(bacon.clone());
        catalog.insert_addition(cheddar.clone());
        Fixture {
            catalog,
            burger,
            bacon,
            cheddar,
        }
    }

    fn line(product_id: Uuid, quantity: i64, additions: &[Uuid]) -> NewSaleItem {
        NewSaleItem {
            product_id,
            quantity,
            additions: additions.iter().map(|&id| AdditionRef { id }).collect(),
        }
    }

    #[tokio::test]
    async fn test_single_item_with_addition() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 2, &[f.bacon.id])],
            ..Default::default()
        };

        let priced = price_sale(&candidate, &f.catalog).await.unwrap();

        assert_eq!(priced.items[0].unit_price_cents, 1000);
        assert_eq!(priced.items[0].total_price_cents, 2500);
        assert_eq!(priced.total_cents, 2500);
    }

    #[tokio::test]
    async fn test_two_items_sum_to_sale_total() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![
                line(f.burger.id, 2, &[f.bacon.id]),
                line(f.burger.id, 1, &[f.bacon.id, f.cheddar.id]),
            ],
            ..Default::default()
        };

        let priced = price_sale(&candidate, &f.catalog).await.unwrap();

        assert_eq!(priced.items[0].total_price_cents, 2500);
        assert_eq!(priced.items[1].total_price_cents, 1500);
        assert_eq!(priced.total_cents, 4000);
    }

    #[tokio::test]
    async fn test_discount_and_additional_charges() {
        let f = fixture();
        let candidate = NewSale {
            discount_cents: 300,
            additional_charges_cents: 500,
            items: vec![line(f.burger.id, 3, &[])],
            ..Default::default()
        };

        let priced = price_sale(&candidate, &f.catalog).await.unwrap();
        assert_eq!(priced.total_cents, 3000 - 300 + 500);
    }

    #[tokio::test]
    async fn test_addition_snapshot_comes_from_catalog() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[f.bacon.id])],
            ..Default::default()
        };

        let priced = price_sale(&candidate, &f.catalog).await.unwrap();
        assert_eq!(priced.items[0].additions, vec![f.bacon.snapshot()]);
    }

    #[tokio::test]
    async fn test_candidate_is_not_mutated() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[f.bacon.id])],
            ..Default::default()
        };
        let before = candidate.clone();

        let _ = price_sale(&candidate, &f.catalog).await.unwrap();
        assert_eq!(candidate, before);
    }

    #[tokio::test]
    async fn test_date_defaults_to_now_and_explicit_date_is_kept() {
        let f = fixture();
        let mut candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[])],
            ..Default::default()
        };

        let before = Utc::now();
        let priced = price_sale(&candidate, &f.catalog).await.unwrap();
        assert!(priced.date >= before && priced.date <= Utc::now());

        let future = Utc.with_ymd_and_hms(2031, 1, 1, 12, 0, 0).unwrap();
        candidate.date = Some(future);
        let priced = price_sale(&candidate, &f.catalog).await.unwrap();
        assert_eq!(priced.date, future);
    }

    #[tokio::test]
    async fn test_empty_sale_totals_adjustments_only() {
        let f = fixture();
        let candidate = NewSale {
            additional_charges_cents: 700,
            ..Default::default()
        };

        let priced = price_sale(&candidate, &f.catalog).await.unwrap();
        assert!(priced.items.is_empty());
        assert_eq!(priced.total_cents, 700);
    }

    #[tokio::test]
    async fn test_nil_product_reference() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(Uuid::nil(), 1, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let f = fixture();
        let missing = Uuid::new_v4();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[]), line(missing, 1, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_product_is_resolved_before_quantity_check() {
        let f = fixture();
        let missing = Uuid::new_v4();
        let candidate = NewSale {
            items: vec![line(missing, 0, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_zero_and_negative_quantity() {
        let f = fixture();
        for quantity in [0, -2] {
            let candidate = NewSale {
                items: vec![line(f.burger.id, quantity, &[])],
                ..Default::default()
            };
            let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
            assert!(matches!(err, CoreError::InvalidQuantity { quantity: q } if q == quantity));
        }
    }

    #[tokio::test]
    async fn test_nil_and_unknown_addition() {
        let f = fixture();

        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[f.bacon.id, Uuid::nil()])],
            ..Default::default()
        };
        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidReference { field } if field == "addition_id"));

        let missing = Uuid::new_v4();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[]), line(f.burger.id, 1, &[missing])],
            ..Default::default()
        };
        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::AdditionNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_lookup_failure_reported_as_not_found() {
        let f = fixture();
        f.catalog.set_unavailable(true);
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == f.burger.id));
    }

    #[tokio::test]
    async fn test_negative_discount_rejected() {
        let f = fixture();
        let candidate = NewSale {
            discount_cents: -100,
            items: vec![line(f.burger.id, 1, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_huge_quantity_overflows_instead_of_wrapping() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(f.burger.id, i64::MAX / 10, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[tokio::test]
    async fn test_surcharge_overflowing_total_rejected() {
        let f = fixture();
        let candidate = NewSale {
            additional_charges_cents: i64::MAX,
            items: vec![line(f.burger.id, 1, &[])],
            ..Default::default()
        };

        let err = price_sale(&candidate, &f.catalog).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::AmountOverflow { ref context } if context == "sale total"
        ));
    }

    #[tokio::test]
    async fn test_price_change_after_pricing_does_not_touch_priced_sale() {
        let f = fixture();
        let candidate = NewSale {
            items: vec![line(f.burger.id, 1, &[])],
            ..Default::default()
        };
        let priced = price_sale(&candidate, &f.catalog).await.unwrap();

        let mut repriced = f.burger.clone();
        repriced.price_cents = 1500;
        f.catalog.insert_product(repriced);

        assert_eq!(priced.items[0].unit_price_cents, 1000);
        let again = price_sale(&candidate, &f.catalog).await.unwrap();
        assert_eq!(again.items[0].unit_price_cents, 1500);
    }
}
