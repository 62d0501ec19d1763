//! Newline-delimited URL list shared by search and the collector

use crate::storage::traits::{StorageError, StorageResult};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Replaces the URL list at `path` with `urls`, one per line, in rank order
pub fn write_url_list(path: &Path, urls: &[String]) -> StorageResult<()> {
    let mut file = fs::File::create(path)?;
    for url in urls {
        writeln!(file, "{}", url)?;
    }
    file.flush()?;
    Ok(())
}

/// Reads the URL list, trimming each line and dropping blank ones
pub fn read_url_list(path: &Path) -> StorageResult<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
