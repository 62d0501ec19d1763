//! Per-origin robots.txt decision cache
//!
//! Decisions live for the lifetime of the gate (one collector run). There is
//! no expiry and nothing is persisted.

use crate::robots::fetch_robots;
use crate::url::origin_key;
use reqwest::Client;
use std::collections::HashMap;
use url::Url;

/// Agent token robots.txt rules are evaluated for
pub const GENERIC_AGENT: &str = "*";

/// Decides whether a URL may be crawled, caching one boolean per origin
///
/// The first URL seen for an origin triggers a robots.txt fetch; every later
/// URL on that origin gets the same answer without touching the network.
/// Any failure to obtain robots.txt denies the whole origin.
pub struct RobotsGate {
    client: Client,
    decisions: HashMap<String, bool>,
}

impl RobotsGate {
    /// Creates an empty gate that fetches robots.txt with `client`
    pub fn new(client: Client) -> Self {
        Self {
            client,
            decisions: HashMap::new(),
        }
    }

    /// Returns whether `url` may be crawled
    pub async fn is_allowed(&mut self, url: &Url) -> bool {
        let origin = origin_key(url);

        if let Some(&allowed) = self.decisions.get(&origin) {
            tracing::debug!("robots.txt decision for {} served from cache", origin);
            return allowed;
        }

        let allowed = match fetch_robots(&self.client, &origin).await {
            Ok(robots) => robots.is_allowed(url.as_str(), GENERIC_AGENT),
            Err(e) => {
                tracing::warn!("Could not obtain robots.txt for {}: {}", origin, e);
                false
            }
        };

        self.decisions.insert(origin, allowed);
        allowed
    }

    /// Returns the cached decision for an origin, if one was made
    pub fn cached(&self, origin: &str) -> Option<bool> {
        self.decisions.get(origin).copied()
    }

    /// Number of origins with a cached decision
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
