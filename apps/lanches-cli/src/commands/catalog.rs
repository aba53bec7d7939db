//! Catalog maintenance: categories, products and additions.

use clap::{Args, Subcommand};
use uuid::Uuid;

use lanches_core::{Addition, Category, Product};

use super::Context;

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Args)]
pub(crate) struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    /// Create a category
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List categories
    List,
}

pub(crate) async fn run_category(command: CategoryCommand, ctx: &Context) -> anyhow::Result<()> {
    match command.command {
        CategorySubcommand::Add { name, description } => {
            let category = Category::new(name, description);
            ctx.bounded(ctx.db.categories().insert(&category)).await?;
            println!("{}", category.id);
        }
        CategorySubcommand::List => {
            for category in ctx.bounded(ctx.db.categories().list()).await? {
                println!(
                    "{}  {}{}",
                    category.id,
                    category.name,
                    category
                        .description
                        .map(|d| format!(" ({d})"))
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product
    Add {
        #[arg(long)]
        category: Uuid,
        name: String,
        /// Price in cents, e.g. 1050 for 10.50
        #[arg(long)]
        price_cents: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// List active products
    List {
        /// Only products of this category
        #[arg(long)]
        category: Option<Uuid>,
    },
    /// Soft-delete a product; past sales are unaffected
    Remove { id: Uuid },
}

pub(crate) async fn run_product(command: ProductCommand, ctx: &Context) -> anyhow::Result<()> {
    let products = ctx.db.products();

    match command.command {
        ProductSubcommand::Add {
            category,
            name,
            price_cents,
            description,
        } => {
            let mut product = Product::new(category, name, price_cents);
            product.description = description;
            ctx.bounded(products.insert(&product)).await?;
            println!("{}", product.id);
        }
        ProductSubcommand::List { category } => {
            let listed = match category {
                Some(category_id) => ctx.bounded(products.list_by_category(category_id)).await?,
                None => ctx.bounded(products.list()).await?,
            };
            for product in listed {
                println!("{}  {:>8}  {}", product.id, product.price().to_string(), product.name);
            }
        }
        ProductSubcommand::Remove { id } => {
            ctx.bounded(products.delete(id)).await?;
        }
    }
    Ok(())
}

// =============================================================================
// Additions
// =============================================================================

#[derive(Debug, Args)]
pub(crate) struct AdditionCommand {
    #[command(subcommand)]
    command: AdditionSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdditionSubcommand {
    /// Create an add-on
    Add {
        name: String,
        /// Price in cents; 0 for free extras
        #[arg(long)]
        price_cents: i64,
    },
    /// List active add-ons
    List,
    /// Soft-delete an add-on; past sales keep their snapshot
    Remove { id: Uuid },
}

pub(crate) async fn run_addition(command: AdditionCommand, ctx: &Context) -> anyhow::Result<()> {
    let additions = ctx.db.additions();

    match command.command {
        AdditionSubcommand::Add { name, price_cents } => {
            let addition = Addition::new(name, price_cents);
            ctx.bounded(additions.insert(&addition)).await?;
            println!("{}", addition.id);
        }
        AdditionSubcommand::List => {
            for addition in ctx.bounded(additions.list()).await? {
                println!(
                    "{}  {:>8}  {}",
                    addition.id,
                    addition.price().to_string(),
                    addition.name
                );
            }
        }
        AdditionSubcommand::Remove { id } => {
            ctx.bounded(additions.delete(id)).await?;
        }
    }
    Ok(())
}
