//! metrotukku-sync - Metrotukku catalog scraper with Supabase upsert

use anyhow::Result;
use clap::{Parser, Subcommand};
use metrotukku_sync::commands::{ScrapeCommand, SyncCommand};
use metrotukku_sync::config::{
    Config, OutputFormat, StorageCredentials, STORAGE_KEY_ENV, STORAGE_URL_ENV,
};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "metrotukku-sync",
    version,
    about = "Scrape the Metrotukku catalog and upsert it into Supabase",
    long_about = "Fetches one page of the Metrotukku product listing, prints the extracted records, and upserts them into a Supabase table keyed on product URL."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for the record list
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing and upsert it (default)
    Sync {
        /// Supabase project URL
        #[arg(long, env = STORAGE_URL_ENV)]
        storage_url: Option<String>,

        /// Supabase API key
        #[arg(long, env = STORAGE_KEY_ENV, hide_env_values = true)]
        storage_key: Option<String>,
    },

    /// Scrape the listing and print it without writing anywhere
    Scrape,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }

    let mut out = std::io::stdout();

    match cli.command {
        Some(Commands::Scrape) => {
            ScrapeCommand::new(config).execute(&mut out).await?;
        }

        Some(Commands::Sync { storage_url, storage_key }) => {
            let credentials = StorageCredentials::new(
                storage_url.unwrap_or_default(),
                storage_key.unwrap_or_default(),
            );
            SyncCommand::new(config, credentials).execute(&mut out).await?;
        }

        None => {
            SyncCommand::new(config, StorageCredentials::from_env()).execute(&mut out).await?;
        }
    }

    Ok(())
}
