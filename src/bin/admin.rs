//! CLI administration tool for url-shortener.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- shorten https://www.json.org
//!
//! # Show the record and usage counter of a code
//! cargo run --bin admin -- stats 3tQ3Ta
//!
//! # Totals over the whole store
//! cargo run --bin admin -- summary
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`url_shortener::config`].

use url_shortener::application::services::{ShortenService, StatsService};
use url_shortener::config;
use url_shortener::domain::entities::shorten_url::format_timestamp;
use url_shortener::error::AppError;
use url_shortener::infrastructure::persistence::database::ping;
use url_shortener::infrastructure::persistence::{
    SqliteShortenUrlRepository, connect, run_migrations,
};
use url_shortener::utils::validation::{validate_code, validate_http_url};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Original URL (prompted for if omitted)
        url: Option<String>,
    },

    /// Show the record of a short code
    Stats {
        /// Six-character short code
        code: String,
    },

    /// Show totals over all short links
    Summary,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    let repository = Arc::new(SqliteShortenUrlRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Shorten { url } => {
            run_migrations(&pool).await?;
            let service = ShortenService::new(repository, config.code_max_attempts);
            shorten(&service, url, config.base_url.as_deref()).await?
        }
        Commands::Stats { code } => stats(&StatsService::new(repository), &code).await?,
        Commands::Summary => summary(&StatsService::new(repository)).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Creates a short link, asking for the URL interactively if needed.
async fn shorten(
    service: &ShortenService<SqliteShortenUrlRepository>,
    url: Option<String>,
    base_url: Option<&str>,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Original URL")
            .validate_with(|input: &String| {
                validate_http_url(input.trim())
                    .map_err(|e| e.message.map(|m| m.to_string()).unwrap_or_default())
            })
            .interact_text()?,
    };
    let url = url.trim();

    validate_http_url(url).map_err(|e| anyhow::anyhow!("Invalid URL: {}", e))?;

    let record = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

    println!("  Code:     {}", record.code.bright_yellow().bold());
    println!("  Original: {}", record.original_url.cyan());
    if let Some(base_url) = base_url {
        println!(
            "  Link:     {}{}",
            base_url.bright_white(),
            record.redirect_path().bright_white()
        );
    }
    println!();
    println!("{}", "Short link created".green().bold());

    Ok(())
}

/// Prints the record of one code.
async fn stats(service: &StatsService<SqliteShortenUrlRepository>, code: &str) -> Result<()> {
    if validate_code(code).is_err() {
        anyhow::bail!("'{}' is not a valid short code", code);
    }

    let record = match service.get_stats(code).await {
        Ok(record) => record,
        Err(AppError::NotFound) => {
            println!("{}", "Shorten URL is not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("{}", "Short link".bright_blue().bold());
    println!();
    println!("  Code:      {}", record.code.bright_yellow().bold());
    println!("  Original:  {}", record.original_url.cyan());
    println!(
        "  Requests:  {}",
        record.request_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        format_timestamp(&record.creation_timestamp).bright_black()
    );
    println!();

    Ok(())
}

/// Displays store-wide totals.
async fn summary(service: &StatsService<SqliteShortenUrlRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Short links: {}",
        summary.records.to_string().bright_green().bold()
    );
    println!(
        "  Redirects:   {}",
        summary.total_requests.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            ping(pool).await?;

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite: {}", version.bright_white());
            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            run_migrations(pool).await?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
