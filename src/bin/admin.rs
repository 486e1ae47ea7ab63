//! CLI administration tool for ephemeral-links.
//!
//! Creates and inspects links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link and its clicks
//! cargo run --bin admin -- links show abc123
//!
//! # Create a link (prompts for the URL when omitted)
//! cargo run --bin admin -- links create --url https://example.com --minutes 60
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` components): required

use ephemeral_links::application::services::{
    CodeGenerator, LinkService, NewLink, StatsService,
};
use ephemeral_links::config::{self, Config};
use ephemeral_links::domain::entities::LinkRecord;
use ephemeral_links::infrastructure::persistence::PgUrlStore;
use ephemeral_links::server::connect_pool;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ephemeral-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a link and its click log
    Show {
        /// Short code
        code: String,
    },

    /// Create a new link
    Create {
        /// Long URL (prompted if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Validity in minutes (defaults to DEFAULT_VALIDITY_MINUTES)
        #[arg(short, long)]
        minutes: Option<i64>,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    let store = Arc::new(PgUrlStore::new(Arc::new(pool)));
    let stats = StatsService::new(store.clone());

    match action {
        LinkAction::List => list_links(&stats, config).await?,
        LinkAction::Show { code } => show_link(&stats, config, &code).await?,
        LinkAction::Create {
            url,
            minutes,
            code,
            yes,
        } => {
            let generator =
                CodeGenerator::from_entropy(store.clone()).with_max_attempts(config.code_max_attempts);
            let service = LinkService::new(store, generator, config.base_url.clone())
                .with_default_validity(config.default_validity_minutes);

            let request = NewLink {
                long_url: match url {
                    Some(u) => u,
                    None => Input::new().with_prompt("Long URL").interact_text()?,
                },
                validity_minutes: minutes,
                custom_code: code,
            };

            create_link(&service, request, yes).await?;
        }
    }

    Ok(())
}

/// Prints every link as a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code       Clicks   Expires              Status   Target
///   ─────────────────────────────────────────────────────────────────
///   abc123     12       2025-01-15 10:30     ACTIVE   https://example.com
///   old-one    3        2024-12-01 08:00     EXPIRED  example.org/page
/// ```
async fn list_links(stats: &StatsService<PgUrlStore>, config: &Config) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = stats
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<20} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Status".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for link in &links {
        println!(
            "  {:<12} {:<8} {:<20} {:<8} {}",
            link.short_code.cyan(),
            link.click_count.to_string().bright_green(),
            link.expires_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status(link, now),
            link.long_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!("  Base URL: {}", config.base_url.bright_black());
    println!();

    Ok(())
}

async fn show_link(stats: &StatsService<PgUrlStore>, config: &Config, code: &str) -> Result<()> {
    let details = stats
        .link_details(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let link = &details.link;

    println!("{}", "Link".bright_blue().bold());
    println!();
    println!(
        "  Short URL: {}",
        format!("{}/{}", config.base_url.trim_end_matches('/'), link.short_code).bright_yellow()
    );
    println!("  Target:    {}", link.long_url.cyan());
    println!("  Created:   {}", link.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Expires:   {}", link.expires_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Status:    {}", status(link, Utc::now()));
    println!(
        "  Clicks:    {} counted, {} logged",
        link.click_count.to_string().bright_green().bold(),
        details.clicks.len().to_string().bright_green()
    );
    println!();

    if details.clicks.is_empty() {
        return Ok(());
    }

    println!(
        "  {:<20} {:<18} {}",
        "Clicked".bright_white().bold(),
        "Location".bright_white().bold(),
        "Referrer".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for click in &details.clicks {
        println!(
            "  {:<20} {:<18} {}",
            click.clicked_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            click.location.as_deref().unwrap_or("-"),
            click.referrer.as_deref().unwrap_or("-").bright_black()
        );
    }
    println!();

    Ok(())
}

/// Creates a link after showing what will be stored.
async fn create_link(
    service: &LinkService<PgUrlStore>,
    request: NewLink,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create Short Link".bright_blue().bold());
    println!();
    println!("  Target:   {}", request.long_url.cyan());
    if let Some(ref code) = request.custom_code {
        println!("  Code:     {}", code.cyan());
    }
    if let Some(minutes) = request.validity_minutes {
        println!("  Validity: {} min", minutes);
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let record = service
        .shorten(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!();
    println!(
        "  {}",
        service.short_url(&record.short_code).bright_yellow().bold()
    );
    println!(
        "  valid until {}",
        record.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;
            let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM click_logs")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Links:  {}", links.to_string().bright_green());
            println!("  Clicks: {}", clicks.to_string().bright_green());
        }
    }

    Ok(())
}

fn status(link: &LinkRecord, now: chrono::DateTime<Utc>) -> ColoredString {
    if link.is_expired_at(now) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    }
}
