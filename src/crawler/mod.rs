//! Crawler module for contact page harvesting
//!
//! This module contains the core collecting logic, including:
//! - HTTP fetching with exponential backoff and a courtesy delay
//! - HTML parsing into title and visible text
//! - The sequential collector loop

mod collector;
mod fetcher;
mod parser;

pub use collector::Collector;
pub use fetcher::{build_http_client, fetch_with_backoff, BackoffPolicy, FetchResult};
pub use parser::{parse_html, ParsedPage};

use crate::config::Config;
use crate::output::RunStatistics;
use crate::storage::{read_url_list, CsvEmailStore};
use crate::TrawlError;
use std::path::Path;

/// Runs the collector over the configured URL list
///
/// This is the main entry point for the extraction stage. It will:
/// 1. Read the URL list written by search
/// 2. Build the HTTP client and robots.txt gate
/// 3. Visit every URL in order
/// 4. Append accepted addresses to the configured CSV store
///
/// # Returns
///
/// * `Ok(RunStatistics)` - The run finished (individual URLs may have failed)
/// * `Err(TrawlError::Storage(StorageError::NotFound(_)))` - No URL list yet
/// * `Err(TrawlError)` - The store could not be written
pub async fn collect(config: &Config) -> Result<RunStatistics, TrawlError> {
    let urls = read_url_list(Path::new(&config.files.url_list))?;
    let store = CsvEmailStore::new(&config.files.email_store);

    let mut collector = Collector::new(config, store)?;
    collector.run(&urls).await
}
