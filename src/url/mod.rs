//! URL handling module for Mailtrawl
//!
//! This module provides candidate URL parsing, origin derivation for the
//! robots.txt cache, and the site title fallback.

mod domain;
mod title;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{origin_key, site_label};
pub use title::{fallback_title, resolve_title, FALLBACK_TITLE};

/// Parses one line of the URL list into a crawlable URL
///
/// Only absolute `http` and `https` URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use mailtrawl::url::parse_site_url;
///
/// assert!(parse_site_url(" https://example.com/contact ").is_ok());
/// assert!(parse_site_url("mailto:someone@example.com").is_err());
/// assert!(parse_site_url("/relative/path").is_err());
/// ```
pub fn parse_site_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(trimmed.to_string()));
    }

    Ok(url)
}
