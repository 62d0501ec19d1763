//! State module for classifying crawl results
//!
//! Each URL in a collector run ends in exactly one `SiteOutcome`.

mod site_outcome;

pub use site_outcome::SiteOutcome;
