//! Output module for operator-facing reports
//!
//! This module handles:
//! - Listing the email store
//! - Recording and printing collector run statistics

mod listing;
pub mod stats;

pub use listing::{format_record, print_listing, write_listing};
pub use stats::{print_statistics, RunStatistics};
