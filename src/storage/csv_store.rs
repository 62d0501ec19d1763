//! CSV email store implementation
//!
//! Rows have no header and four columns:
//! `address, source_url, site_title, captured_at`.

use crate::storage::traits::{EmailStore, StorageError, StorageResult};
use crate::storage::{EmailRecord, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Append-only CSV backend for harvested addresses
#[derive(Debug, Clone)]
pub struct CsvEmailStore {
    path: PathBuf,
}

impl CsvEmailStore {
    /// Creates a store backed by the file at `path`
    ///
    /// Nothing is touched on disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every row that parses, skipping the rest with a warning
    ///
    /// Used for listing, where one hand-edited or truncated row should not
    /// hide the others. [`EmailStore::load_all`] stays strict.
    pub fn load_readable(&self) -> StorageResult<Vec<EmailRecord>> {
        let mut reader = self.reader()?;
        let mut records = Vec::new();

        for row in reader.records() {
            let parsed = match row {
                Ok(row) if is_blank(&row) => continue,
                Ok(row) => parse_row(&row),
                Err(e) => Err(e.into()),
            };

            match parsed {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping row in {}: {}", self.path.display(), e),
            }
        }

        Ok(records)
    }

    fn reader(&self) -> StorageResult<csv::Reader<std::fs::File>> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }

        Ok(ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?)
    }
}

impl EmailStore for CsvEmailStore {
    fn append(&mut self, records: &[EmailRecord]) -> StorageResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        for record in records {
            let captured_at = record.captured_at.format(TIMESTAMP_FORMAT).to_string();
            writer.write_record([
                record.address.as_str(),
                record.source_url.as_str(),
                record.site_title.as_str(),
                captured_at.as_str(),
            ])?;
        }

        writer.flush()?;

        tracing::debug!("Appended {} rows to {}", records.len(), self.path.display());

        Ok(records.len())
    }

    fn load_all(&self) -> StorageResult<Vec<EmailRecord>> {
        let mut reader = self.reader()?;
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;
            if is_blank(&row) {
                continue;
            }
            records.push(parse_row(&row)?);
        }

        Ok(records)
    }

    /// Reads only the first column, so hand-edited files listing bare
    /// addresses are usable by the sender too
    fn load_addresses(&self) -> StorageResult<Vec<String>> {
        let mut reader = self.reader()?;
        let mut addresses = Vec::new();

        for row in reader.records() {
            let row = row?;
            if let Some(address) = row.get(0).map(str::trim).filter(|a| !a.is_empty()) {
                addresses.push(address.to_string());
            }
        }

        Ok(addresses)
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

fn parse_row(row: &StringRecord) -> StorageResult<EmailRecord> {
    let line = row.position().map_or(0, |p| p.line());

    if row.len() < 4 {
        return Err(StorageError::Malformed {
            line,
            reason: format!("expected 4 columns, found {}", row.len()),
        });
    }

    let captured_at = NaiveDateTime::parse_from_str(&row[3], TIMESTAMP_FORMAT).map_err(|e| {
        StorageError::Malformed {
            line,
            reason: format!("bad timestamp '{}': {}", &row[3], e),
        }
    })?;

    Ok(EmailRecord {
        address: row[0].to_string(),
        source_url: row[1].to_string(),
        site_title: row[2].to_string(),
        captured_at,
    })
}
