//! Collector - per-URL crawl orchestration
//!
//! This module contains the collector loop that walks the URL list in order
//! and, for each entry:
//! - Checks robots.txt through the per-origin gate
//! - Fetches the page with backoff
//! - Extracts visible text and candidate addresses
//! - Drops addresses already seen this run
//! - Filters what is left and appends it to the store

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_with_backoff, BackoffPolicy, FetchResult};
use crate::crawler::parser::parse_html;
use crate::extract::{extract_emails, partition_acceptable};
use crate::output::RunStatistics;
use crate::robots::RobotsGate;
use crate::state::SiteOutcome;
use crate::storage::{EmailRecord, EmailStore};
use crate::url::{parse_site_url, resolve_title};
use crate::TrawlError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Instant;

/// Sequential collector over a list of candidate URLs
///
/// The robots decision cache and the set of addresses seen so far both live
/// exactly as long as the collector.
pub struct Collector<S: EmailStore> {
    client: Client,
    robots: RobotsGate,
    policy: BackoffPolicy,
    store: S,
    seen: HashSet<String>,
    stats: RunStatistics,
}

impl<S: EmailStore> Collector<S> {
    /// Creates a collector from the crawler configuration
    pub fn new(config: &Config, store: S) -> Result<Self, TrawlError> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        let policy = BackoffPolicy::from_config(&config.crawler);
        Ok(Self::with_client(client, policy, store))
    }

    /// Creates a collector around an existing client and policy
    pub fn with_client(client: Client, policy: BackoffPolicy, store: S) -> Self {
        Self {
            robots: RobotsGate::new(client.clone()),
            client,
            policy,
            store,
            seen: HashSet::new(),
            stats: RunStatistics::default(),
        }
    }

    /// Runs the collector over `urls` in order
    ///
    /// Failures tied to one URL are logged and skipped. Only a store write
    /// failure ends the run early.
    pub async fn run(&mut self, urls: &[String]) -> Result<RunStatistics, TrawlError> {
        let start_time = Instant::now();
        tracing::info!("Starting collector over {} URLs", urls.len());

        for raw in urls {
            let outcome = self.process_url(raw).await?;
            self.stats.record(outcome);
        }

        self.stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Collector finished: {} sites, {} rows written in {:?}",
            self.stats.total_sites(),
            self.stats.records_written,
            self.stats.elapsed
        );

        Ok(self.stats.clone())
    }

    /// Processes a single URL
    ///
    /// Returns the outcome for that URL; `Err` only for store failures.
    pub async fn process_url(&mut self, raw: &str) -> Result<SiteOutcome, TrawlError> {
        let url = match parse_site_url(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping invalid URL entry: {}", e);
                return Ok(SiteOutcome::InvalidUrl);
            }
        };

        tracing::info!("Extracting contact info from: {}", url);

        if !self.robots.is_allowed(&url).await {
            tracing::info!("Access denied by robots.txt: {}", url);
            return Ok(SiteOutcome::RobotsDenied);
        }

        let body = match fetch_with_backoff(&self.client, url.as_str(), &self.policy).await {
            FetchResult::Success { body, .. } => body,
            FetchResult::Exhausted {
                attempts,
                last_error,
            } => {
                tracing::warn!(
                    "Skipping {} after {} failed attempts ({})",
                    url,
                    attempts,
                    last_error
                );
                return Ok(SiteOutcome::FetchFailed);
            }
        };

        let page = parse_html(&body);
        let title = resolve_title(page.title.as_deref(), &url);

        // First-seen URL wins for an address within the run
        let fresh: Vec<EmailRecord> = extract_emails(&page.text)
            .into_iter()
            .filter(|address| self.seen.insert(address.clone()))
            .map(|address| EmailRecord::captured_now(address, url.as_str(), title.as_str()))
            .collect();

        self.stats.new_candidates += fresh.len() as u64;

        let written = self.persist(fresh)?;
        if written > 0 {
            tracing::info!("Saved {} addresses from {}", written, url);
            Ok(SiteOutcome::Harvested)
        } else {
            Ok(SiteOutcome::NoEmails)
        }
    }

    /// Filters `records` and appends the survivors to the store
    fn persist(&mut self, records: Vec<EmailRecord>) -> Result<usize, TrawlError> {
        let (accepted, dropped) = partition_acceptable(records, |r| r.address.as_str());

        if !dropped.is_empty() {
            tracing::debug!(
                "Filtered out {} addresses: {:?}",
                dropped.len(),
                dropped.iter().map(|r| r.address.as_str()).collect::<Vec<_>>()
            );
        }

        let written = self.store.append(&accepted)?;

        self.stats.records_dropped += dropped.len() as u64;
        self.stats.records_written += written as u64;

        Ok(written)
    }

    /// Statistics gathered so far
    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// The robots.txt gate, for inspecting cached decisions
    pub fn robots(&self) -> &RobotsGate {
        &self.robots
    }

    /// Consumes the collector, returning its store
    pub fn into_store(self) -> S {
        self.store
    }
}
