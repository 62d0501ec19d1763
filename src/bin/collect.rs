//! Mailtrawl collector entry point
//!
//! Finds candidate websites, harvests contact addresses from them, and lists
//! what has been harvested so far.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mailtrawl::config::{load_config_or_default, Config};
use mailtrawl::crawler::collect;
use mailtrawl::output::{print_listing, print_statistics};
use mailtrawl::search::search_and_persist;
use mailtrawl::storage::{CsvEmailStore, StorageError};
use mailtrawl::TrawlError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailtrawl collector: polite contact-page harvesting
///
/// Actions run in the order search, extract, list. With no action the help
/// text is printed.
#[derive(Parser, Debug)]
#[command(name = "mailtrawl-collect")]
#[command(version)]
#[command(about = "Email collector for contact pages", long_about = None)]
struct Cli {
    /// Search for websites and save them to the URL list (optional: max number of results)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    search: Option<Option<usize>>,

    /// Search query to use instead of the configured default
    #[arg(long, value_name = "QUERY")]
    query: Option<String>,

    /// Extract emails from the websites in the URL list
    #[arg(long)]
    extract: bool,

    /// List all extracted emails
    #[arg(long)]
    list: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.search.is_none() && !cli.extract && !cli.list {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(limit) = cli.search {
        let limit = limit.unwrap_or(config.search.default_limit);
        let query = cli
            .query
            .clone()
            .unwrap_or_else(|| config.search.default_query.clone());
        handle_search(&config, &query, limit).await?;
    }

    if cli.extract {
        handle_extract(&config, cli.quiet).await?;
    }

    if cli.list {
        handle_list(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailtrawl=info,warn"),
            1 => EnvFilter::new("mailtrawl=debug,info"),
            2 => EnvFilter::new("mailtrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --search: replaces the URL list with fresh results
async fn handle_search(config: &Config, query: &str, limit: usize) -> Result<()> {
    println!("Searching for websites with query: {}", query);

    match search_and_persist(config, query, limit).await {
        Ok(count) => {
            println!("{} websites saved to {}", count, config.files.url_list);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles --extract: runs the collector over the URL list
async fn handle_extract(config: &Config, quiet: bool) -> Result<()> {
    match collect(config).await {
        Ok(stats) => {
            if stats.records_written > 0 {
                println!(
                    "{} emails saved to {}",
                    stats.records_written, config.files.email_store
                );
            } else {
                println!("No emails found.");
            }
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(TrawlError::Storage(StorageError::NotFound(_))) => {
            println!(
                "{} not found. Run with --search first.",
                config.files.url_list
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Extraction failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles --list: prints every readable stored row
fn handle_list(config: &Config) -> Result<()> {
    let store = CsvEmailStore::new(&config.files.email_store);

    match store.load_readable() {
        Ok(records) => {
            print_listing(&records)?;
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{} not found.", config.files.email_store);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
