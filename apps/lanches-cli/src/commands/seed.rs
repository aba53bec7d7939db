//! # Seed Data
//!
//! Populates an empty database with a small snack-bar catalog for
//! development and demos.
//!
//! ## Usage
//! ```bash
//! lanches --db ./lanches_dev.db seed
//! lanches --db ./lanches_dev.db product list
//! ```

use tracing::info;

use lanches_core::{Addition, Category, Product};

use super::Context;

/// (category, description, [(product, price in cents)])
const MENU: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Burgers",
        "Grilled to order",
        &[
            ("X-Burger", 1000),
            ("X-Salada", 1200),
            ("X-Bacon", 1500),
            ("X-Tudo", 2200),
        ],
    ),
    (
        "Hot Dogs",
        "Served with potato sticks",
        &[("Cachorro-Quente", 900), ("Dog Duplo", 1300)],
    ),
    (
        "Drinks",
        "Cold drinks",
        &[
            ("Refrigerante Lata", 500),
            ("Suco de Laranja", 700),
            ("Água Mineral", 300),
        ],
    ),
];

/// (add-on, price in cents)
const ADDITIONS: &[(&str, i64)] = &[
    ("Bacon", 250),
    ("Queijo", 250),
    ("Ovo", 150),
    ("Cheddar", 300),
    ("Catupiry", 300),
    ("Maionese Extra", 0),
];

pub(crate) async fn run(ctx: &Context) -> anyhow::Result<()> {
    let existing = ctx.bounded(ctx.db.products().list()).await?;
    if !existing.is_empty() {
        println!("Database already has {} products, skipping seed.", existing.len());
        return Ok(());
    }

    let categories = ctx.db.categories();
    let products = ctx.db.products();
    let additions = ctx.db.additions();

    let mut product_count = 0;
    for (category_name, description, items) in MENU {
        let category = Category::new(*category_name, Some(description.to_string()));
        ctx.bounded(categories.insert(&category)).await?;

        for (name, price_cents) in items.iter() {
            ctx.bounded(products.insert(&Product::new(category.id, *name, *price_cents)))
                .await?;
            product_count += 1;
        }
    }

    for (name, price_cents) in ADDITIONS {
        ctx.bounded(additions.insert(&Addition::new(*name, *price_cents)))
            .await?;
    }

    info!(
        categories = MENU.len(),
        products = product_count,
        additions = ADDITIONS.len(),
        "Seed complete"
    );
    println!(
        "Seeded {} categories, {} products, {} additions.",
        MENU.len(),
        product_count,
        ADDITIONS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanches_db::{Database, DbConfig};
    use std::time::Duration;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctx = Context::new(db.clone(), Duration::from_secs(5));

        run(&ctx).await.unwrap();
        run(&ctx).await.unwrap();

        assert_eq!(db.categories().list().await.unwrap().len(), MENU.len());
        assert_eq!(db.products().list().await.unwrap().len(), 9);
        assert_eq!(db.additions().list().await.unwrap().len(), ADDITIONS.len());
    }
}
