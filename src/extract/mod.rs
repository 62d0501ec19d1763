//! Address extraction and filtering
//!
//! Candidates are pulled out of page text with a case-insensitive pattern
//! (`pattern`) and screened before persistence (`filter`).

mod filter;
mod pattern;

pub use filter::{is_acceptable, partition_acceptable};
pub use pattern::{extract_emails, EMAIL_PATTERN};
