//! Statistics for a single collector run
//!
//! This module tracks what happened to every URL in a run and prints the
//! summary shown to the operator at the end.

use crate::state::SiteOutcome;
use std::collections::HashMap;
use std::time::Duration;

/// Collector run statistics
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Count of URLs by outcome
    pub sites_by_outcome: HashMap<SiteOutcome, u64>,

    /// Candidates that were new to this run (after within-run dedup)
    pub new_candidates: u64,

    /// Rows appended to the store
    pub records_written: u64,

    /// New candidates rejected by the address filter
    pub records_dropped: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Records the outcome of one URL
    pub fn record(&mut self, outcome: SiteOutcome) {
        *self.sites_by_outcome.entry(outcome).or_insert(0) += 1;
    }

    /// Number of URLs that ended in `outcome`
    pub fn count(&self, outcome: SiteOutcome) -> u64 {
        self.sites_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Total URLs processed
    pub fn total_sites(&self) -> u64 {
        self.sites_by_outcome.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Collector Statistics ===\n");

    println!("Sites by Outcome:");
    let total = stats.total_sites();
    for outcome in SiteOutcome::all() {
        let count = stats.count(outcome);
        if count == 0 {
            continue;
        }
        let percentage = if total > 0 {
            (count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!("Addresses:");
    println!("  New candidates: {}", stats.new_candidates);
    println!("  Written: {}", stats.records_written);
    println!("  Filtered out: {}", stats.records_dropped);
    println!();

    println!(
        "Processed {} sites in {:.1}s",
        total,
        stats.elapsed.as_secs_f64()
    );
}
