//! HTTP fetcher implementation
//!
//! This module handles page requests for the collector, including:
//! - Building HTTP clients with the crawler's identity header and timeout
//! - GET requests with bounded exponential backoff
//! - The courtesy pause after every successful fetch

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
        /// Attempts used, including the successful one
        attempts: u32,
    },

    /// Every attempt failed; the URL is skipped
    Exhausted {
        /// Attempts made
        attempts: u32,
        /// Description of the final failure
        last_error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Retry and courtesy timing for page fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total attempts per URL
    pub max_attempts: u32,
    /// Wait after the first failure; doubles after each further failure
    pub base_delay: Duration,
    /// Pause after a successful fetch before the next request may start
    pub polite_delay: Duration,
}

impl BackoffPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            base_delay: config.base_delay(),
            polite_delay: config.polite_delay(),
        }
    }

    /// Wait following failed attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt-1)`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// The full sequence of waits a URL that never succeeds goes through
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_attempts).map(|n| self.delay_after(n)).collect()
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Hard limit for each whole request
///
/// # Example
///
/// ```no_run
/// use mailtrawl::config::UserAgentConfig;
/// use mailtrawl::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying request-level failures with exponential backoff
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx with readable body | Success, then polite delay |
/// | Non-2xx status | Wait, retry |
/// | Timeout / connection error | Wait, retry |
/// | Body read error | Wait, retry |
///
/// The n-th failure waits `base_delay * 2^(n-1)`, including the last one, so
/// three failures with a 2 s base wait 2 s, 4 s and 8 s. Exhaustion is logged
/// and reported, never raised.
pub async fn fetch_with_backoff(client: &Client, url: &str, policy: &BackoffPolicy) -> FetchResult {
    let mut attempt = 0;
    let mut last_error = String::new();

    while attempt < policy.max_attempts {
        attempt += 1;

        match fetch_once(client, url).await {
            Ok((final_url, status_code, body)) => {
                tracing::debug!("Fetched {} ({}) on attempt {}", url, status_code, attempt);

                if !policy.polite_delay.is_zero() {
                    tokio::time::sleep(policy.polite_delay).await;
                }

                return FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                    attempts: attempt,
                };
            }
            Err(e) => {
                let wait = policy.delay_after(attempt);
                tracing::warn!(
                    "Error accessing {} (attempt {}/{}): {}. Waiting {:?}",
                    url,
                    attempt,
                    policy.max_attempts,
                    e,
                    wait
                );
                last_error = describe(&e);
                tokio::time::sleep(wait).await;
            }
        }
    }

    tracing::error!("Failed to access {} after {} attempts", url, attempt);

    FetchResult::Exhausted {
        attempts: attempt,
        last_error,
    }
}

/// One GET; non-2xx is an error
async fn fetch_once(client: &Client, url: &str) -> Result<(String, u16, String), reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let final_url = response.url().to_string();
    let status_code = response.status().as_u16();
    let body = response.text().await?;
    Ok((final_url, status_code, body))
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection failed".to_string()
    } else if let Some(status) = e.status() {
        format!("HTTP {}", status.as_u16())
    } else {
        e.to_string()
    }
}
