//! Storage traits and error types
//!
//! This module defines the trait interface for email store backends and
//! associated error types.

use crate::storage::EmailRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Returns true if the error only means the backing file does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for email store implementations
///
/// The store is append-only: rows are never rewritten or deleted, and no
/// deduplication happens against rows already present.
pub trait EmailStore {
    /// Appends records, making them durable before returning
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn append(&mut self, records: &[EmailRecord]) -> StorageResult<usize>;

    /// Loads every record in insertion order
    fn load_all(&self) -> StorageResult<Vec<EmailRecord>>;

    /// Loads just the address of every record in insertion order
    fn load_addresses(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .load_all()?
            .into_iter()
            .map(|record| record.address)
            .collect())
    }
}
