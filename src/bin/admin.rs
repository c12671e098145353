//! CLI administration tool for shortener-store.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API or the owner cookie.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # List an owner's links
//! cargo run --bin admin -- links list 3f2a9c...
//!
//! # Shorten a URL on behalf of an owner
//! cargo run --bin admin -- links shorten https://example.org --owner 3f2a9c...
//!
//! # Remove links
//! cargo run --bin admin -- links remove 3f2a9c... v w
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string, or the
//!   `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` components
//! - `BASE_URL` (optional): prefix of rendered short links (default: `http://localhost:8080`)
//! - `CODE_RADIX` (optional): short code radix (default: 36)

use shortener_store::config::{self, Config};
use shortener_store::domain::error::StoreError;
use shortener_store::domain::repositories::UrlStore;
use shortener_store::infrastructure::persistence::PgUrlStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortener-store.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List live links of an owner
    List {
        /// Owner id (the part of the `uid` cookie before the dot)
        owner: String,
    },

    /// Shorten a URL
    Shorten {
        /// URL to shorten
        url: String,

        /// Owner id; the link is unowned if omitted
        #[arg(short, long, default_value = "")]
        owner: String,
    },

    /// Remove links of an owner
    Remove {
        /// Owner id
        owner: String,

        /// Short codes to remove
        #[arg(required = true)]
        codes: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        Config::load_database_url()?.context("DATABASE_URL or DB_USER must be set")?;
    let links = config::load_link_builder()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let store = PgUrlStore::new(Arc::new(pool), links);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &store).await?,
        Commands::Stats => handle_stats(&store).await?,
        Commands::Db { action } => handle_db_action(action, &store).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, store: &PgUrlStore) -> Result<()> {
    match action {
        LinksAction::List { owner } => list_links(store, &owner).await,
        LinksAction::Shorten { url, owner } => shorten(store, &url, &owner).await,
        LinksAction::Remove { owner, codes, yes } => remove_links(store, &owner, codes, yes).await,
    }
}

/// Lists live links of an owner.
///
/// # Output Format
///
/// ```text
/// 🔗 Links of 3f2a9c...
///
///   Code       Short URL                          Original URL
///   ─────────────────────────────────────────────────────────────────
///   v          http://localhost:8080/v            https://example.org
/// ```
async fn list_links(store: &PgUrlStore, owner: &str) -> Result<()> {
    println!("{} {}", "🔗 Links of".bright_blue().bold(), owner.cyan());
    println!();

    let links = store
        .list_by_owner(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<34} {}",
        "Code".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<34} {}",
            link.code.bright_yellow(),
            link.short_url.cyan(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shortens a URL, reporting an existing link instead of failing on conflict.
async fn shorten(store: &PgUrlStore, url: &str, owner: &str) -> Result<()> {
    match store.write_url(url, owner).await {
        Ok(short_url) => {
            println!("{}", "✅ Link created".green().bold());
            println!("  {}", short_url.bright_yellow().bold());
        }
        Err(StoreError::Conflict { short_url }) => {
            println!("{}", "⚠️  URL already shortened for this owner".yellow());
            println!("  {}", short_url.bright_yellow().bold());
        }
        Err(e) if e.is_bad_input() => {
            anyhow::bail!("Rejected: {}", e);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten: {}", e)),
    }

    Ok(())
}

/// Removes links of an owner with a confirmation prompt.
///
/// Codes that are invalid, unknown, or not owned by `owner` are ignored by
/// the store; the before/after counts show how many were removed.
async fn remove_links(
    store: &PgUrlStore,
    owner: &str,
    codes: Vec<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Remove links".bright_blue().bold());
    println!();
    println!("  Owner: {}", owner.cyan());
    println!("  Codes: {}", codes.join(", ").bright_yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove these links?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let before = store
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    store
        .batch_remove(owner, codes)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove links: {}", e))?;

    let after = store
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Removed:".green().bold(),
        (after.removed - before.removed).to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays live and removed link counts.
async fn handle_stats(store: &PgUrlStore) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let counts = store
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    let owners: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT uid) FROM urls WHERE NOT deleted AND uid <> ''")
            .fetch_one(store.pool())
            .await?;

    println!(
        "  Live links:    {}",
        counts.live.to_string().bright_green().bold()
    );
    println!(
        "  Removed links: {}",
        counts.removed.to_string().bright_black().bold()
    );
    println!("  Owners:        {}", owners.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, store: &PgUrlStore) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            store
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(store.pool())
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(store.pool())
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
