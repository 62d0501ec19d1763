//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! robots.txt decisions. It fails closed: when robots.txt cannot be obtained
//! the origin is treated as off limits.

mod cache;
mod parser;

pub use cache::{RobotsGate, GENERIC_AGENT};
pub use parser::ParsedRobots;

use crate::TrawlError;
use reqwest::{Client, StatusCode};
use url::Url;

/// Fetches and interprets robots.txt for an origin
///
/// # Status handling
///
/// | Response | Result |
/// |----------|--------|
/// | 2xx | Parsed rules |
/// | 401, 403 | Deny everything |
/// | Other 4xx | Allow everything (no robots.txt) |
/// | 5xx, network error | `Err` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `origin` - Scheme, host and optional port, e.g. `https://example.com`
pub async fn fetch_robots(client: &Client, origin: &str) -> Result<ParsedRobots, TrawlError> {
    let robots_url = Url::parse(origin)?.join("/robots.txt")?;

    let response = client
        .get(robots_url.as_str())
        .send()
        .await
        .map_err(|source| TrawlError::Http {
            url: robots_url.to_string(),
            source,
        })?;

    let status = response.status();

    if status.is_success() {
        let body = response.text().await.map_err(|source| TrawlError::Http {
            url: robots_url.to_string(),
            source,
        })?;
        return Ok(ParsedRobots::from_content(&body));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::debug!("robots.txt at {} answered {}, denying", robots_url, status);
        return Ok(ParsedRobots::deny_all());
    }

    if status.is_client_error() {
        tracing::debug!("robots.txt at {} answered {}, allowing", robots_url, status);
        return Ok(ParsedRobots::allow_all());
    }

    Err(TrawlError::RobotsUnavailable {
        url: robots_url.to_string(),
        status: status.as_u16(),
    })
}
