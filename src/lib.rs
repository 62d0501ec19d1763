//! Mailtrawl: a polite contact-page harvester and outreach mailer
//!
//! This crate discovers candidate websites through a search endpoint, crawls
//! each one while respecting robots.txt, extracts contact addresses into a flat
//! CSV store, and later mails a generated message to everything in that store.

pub mod compose;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod mailer;
pub mod output;
pub mod robots;
pub mod search;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Mailtrawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("robots.txt unavailable at {url} (HTTP {status})")]
    RobotsUnavailable { url: String, status: u16 },

    #[error("Search endpoint returned {status}: {body}")]
    SearchFailed { status: u16, body: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Mailtrawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use state::SiteOutcome;
pub use storage::EmailRecord;
