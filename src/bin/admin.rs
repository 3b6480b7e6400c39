//! CLI administration tool for cashlens.
//!
//! Manages categories and checks the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a top-level category and a child
//! cargo run --bin admin -- category create Food
//! cargo run --bin admin -- category create Groceries --parent 1 --remark "Weekly shopping"
//!
//! # List categories (all, or the children of one)
//! cargo run --bin admin -- category list
//! cargo run --bin admin -- category list --parent 1
//!
//! # Show or delete by id or by name
//! cargo run --bin admin -- category show --name Groceries
//! cargo run --bin admin -- category delete --id 2
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use cashlens::application::services::CategoryService;
use cashlens::domain::entities::Category;
use cashlens::infrastructure::cache::CategoryCache;
use cashlens::infrastructure::persistence::PgCategoryRepository;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing cashlens.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Category management subcommands.
#[derive(Subcommand)]
enum CategoryAction {
    /// Create a new category
    Create {
        /// Category name (must be unique)
        name: String,

        /// Parent category id
        #[arg(short, long)]
        parent: Option<i64>,

        /// Free-text remark
        #[arg(short, long)]
        remark: Option<String>,
    },

    /// List categories
    List {
        /// Only list the direct children of this category id
        #[arg(short, long)]
        parent: Option<i64>,
    },

    /// Show a single category
    Show(Selector),

    /// Delete a category
    Delete {
        #[command(flatten)]
        selector: Selector,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Selects a category by exactly one of id or name.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Selector {
    /// Category id
    #[arg(long)]
    id: Option<i64>,

    /// Category name (exact match)
    #[arg(long)]
    name: Option<String>,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type Service = CategoryService<PgCategoryRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Category { action } => handle_category_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches category commands.
///
/// The CLI is a short-lived process, so it gets its own cache instance rather
/// than sharing one with a running server.
async fn handle_category_action(action: CategoryAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgCategoryRepository::new(Arc::new(pool.clone())));
    let service = CategoryService::new(repository, Arc::new(CategoryCache::new()));

    match action {
        CategoryAction::Create {
            name,
            parent,
            remark,
        } => create_category(&service, name, parent, remark).await,
        CategoryAction::List { parent } => list_categories(&service, parent).await,
        CategoryAction::Show(selector) => show_category(&service, selector).await,
        CategoryAction::Delete { selector, yes } => {
            delete_category(&service, selector, yes).await
        }
    }
}

async fn create_category(
    service: &Service,
    name: String,
    parent: Option<i64>,
    remark: Option<String>,
) -> Result<()> {
    let category = service
        .create_category(parent, name, remark)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create category: {}", e))?;

    println!("{}", "✅ Category created".green().bold());
    println!();
    print_category(&category);
    println!();

    Ok(())
}

/// Lists categories as a table.
///
/// ```text
///   ID    Parent  Name                           Modified
///   ───────────────────────────────────────────────────────────────
///   1     -       Food                           2024-01-15 10:30
///   2     1       Groceries                      2024-01-16 14:20
/// ```
async fn list_categories(service: &Service, parent: Option<i64>) -> Result<()> {
    println!("{}", "📋 Categories".bright_blue().bold());
    println!();

    let categories = service
        .list_categories(parent)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list categories: {}", e))?;

    if categories.is_empty() {
        println!("{}", "  No categories found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<7} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Parent".bright_white().bold(),
        "Name".bright_white().bold(),
        "Modified".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for category in &categories {
        let parent = category
            .parent_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<5} {:<7} {:<30} {}",
            category.id.to_string().bright_black(),
            parent.bright_black(),
            category.name.cyan(),
            category
                .updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        categories.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_category(service: &Service, selector: Selector) -> Result<()> {
    let category = match (selector.id, selector.name) {
        (Some(id), _) => service.get_by_id(id).await,
        (None, Some(name)) => service.get_by_name(&name).await,
        (None, None) => anyhow::bail!("Either --id or --name is required"),
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_category(&category);
    Ok(())
}

/// Deletes a category after confirmation (default: No).
async fn delete_category(service: &Service, selector: Selector, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Category".bright_blue().bold());
    println!();

    if !skip_confirm {
        let target = match (&selector.id, &selector.name) {
            (Some(id), _) => format!("id {}", id),
            (None, Some(name)) => format!("'{}'", name),
            (None, None) => anyhow::bail!("Either --id or --name is required"),
        };

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete category {}?", target))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete_category(selector.id, selector.name.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete category: {}", e))?;

    println!("{}", "✅ Category deleted".green().bold());
    println!();
    print_category(&deleted);
    println!();

    Ok(())
}

fn print_category(category: &Category) {
    println!("  ID:       {}", category.id.to_string().bright_black());
    println!("  Name:     {}", category.name.cyan());
    println!(
        "  Parent:   {}",
        category
            .parent_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(remark) = &category.remark {
        println!("  Remark:   {}", remark);
    }
    println!(
        "  Created:  {}",
        category.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Modified: {}",
        category.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;

            let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
                .fetch_one(pool)
                .await
                .context("Failed to count categories (have migrations been applied?)")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Categories: {}",
                categories.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
