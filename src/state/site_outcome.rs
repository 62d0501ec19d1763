/// Outcome definitions for a single collector visit
use std::fmt;

/// What happened to one candidate URL during a collector run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteOutcome {
    // ===== Success States =====
    /// Page fetched and at least one new address was written to the store
    Harvested,

    /// Page fetched but nothing was written (no addresses, only addresses
    /// already seen this run, or only filtered ones)
    NoEmails,

    // ===== Skip States =====
    /// robots.txt (or its absence through failure) forbids the URL
    RobotsDenied,

    /// The line in the URL list is not a crawlable absolute URL
    InvalidUrl,

    // ===== Error States =====
    /// Every fetch attempt failed
    FetchFailed,
}

impl SiteOutcome {
    /// Returns true if the page was actually fetched
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Harvested | Self::NoEmails)
    }

    /// Returns true if the URL was never requested
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::RobotsDenied | Self::InvalidUrl)
    }

    /// Returns true if requesting the URL failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }

    /// Short machine-friendly label, used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Harvested => "harvested",
            Self::NoEmails => "no_emails",
            Self::RobotsDenied => "robots_denied",
            Self::InvalidUrl => "invalid_url",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all outcomes in reporting order
    pub fn all() -> [Self; 5] {
        [
            Self::Harvested,
            Self::NoEmails,
            Self::RobotsDenied,
            Self::InvalidUrl,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for SiteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
