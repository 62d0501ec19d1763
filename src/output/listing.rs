//! Listing of the email store

use crate::storage::{EmailRecord, TIMESTAMP_FORMAT};
use std::io::{self, Write};

/// Formats one record as a single display line
pub fn format_record(record: &EmailRecord) -> String {
    format!(
        "{} | {} | {} | {}",
        record.address,
        record.source_url,
        record.site_title,
        record.captured_at.format(TIMESTAMP_FORMAT)
    )
}

/// Writes the store contents under an `Extracted emails:` heading
pub fn write_listing<W: Write>(out: &mut W, records: &[EmailRecord]) -> io::Result<()> {
    writeln!(out, "Extracted emails:")?;
    for record in records {
        writeln!(out, "{}", format_record(record))?;
    }
    Ok(())
}

/// Prints the store contents to stdout
pub fn print_listing(records: &[EmailRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_listing(&mut handle, records)
}
