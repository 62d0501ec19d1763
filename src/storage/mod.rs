//! Storage module for persisting harvest data
//!
//! This module handles the two flat files the pipeline shares:
//! - the email store, an append-only CSV of `EmailRecord` rows
//! - the URL list produced by search and consumed by the collector

mod csv_store;
mod traits;
mod url_list;

pub use csv_store::CsvEmailStore;
pub use traits::{EmailStore, StorageError, StorageResult};
pub use url_list::{read_url_list, write_url_list};

use chrono::{Local, NaiveDateTime, Timelike};

/// Format of the `captured_at` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One harvested address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    pub address: String,
    pub source_url: String,
    pub site_title: String,
    /// Local wall-clock time the row was saved, to the second
    pub captured_at: NaiveDateTime,
}

impl EmailRecord {
    /// Creates a record stamped with the current local time
    pub fn captured_now(
        address: impl Into<String>,
        source_url: impl Into<String>,
        site_title: impl Into<String>,
    ) -> Self {
        let now = Local::now().naive_local();
        Self {
            address: address.into(),
            source_url: source_url.into(),
            site_title: site_title.into(),
            captured_at: now.with_nanosecond(0).unwrap_or(now),
        }
    }
}
