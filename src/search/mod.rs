//! Search-and-persist
//!
//! Runs a query against an HTML search results page and writes the ranked
//! result URLs to the URL list, replacing whatever list was there.

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::storage::write_url_list;
use crate::TrawlError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Client for an HTML search results endpoint
pub struct SearchClient {
    client: Client,
    endpoint: Url,
    selector: Selector,
}

impl SearchClient {
    /// Creates a search client from configuration
    pub fn new(config: &Config) -> Result<Self, TrawlError> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        Self::with_client(client, &config.search.endpoint, &config.search.result_selector)
    }

    /// Creates a search client around an existing HTTP client
    pub fn with_client(client: Client, endpoint: &str, selector: &str) -> Result<Self, TrawlError> {
        let endpoint = Url::parse(endpoint)?;
        let selector =
            Selector::parse(selector).map_err(|e| TrawlError::Selector(format!("{:?}", e)))?;

        Ok(Self {
            client,
            endpoint,
            selector,
        })
    }

    /// Returns up to `limit` result URLs for `query`, in rank order
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, TrawlError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|source| TrawlError::Http {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Search endpoint returned {}: {}", status, body);
            return Err(TrawlError::SearchFailed {
                status: status.as_u16(),
                body,
            });
        }

        let html = response.text().await?;
        let results = extract_result_links(&html, &self.selector, &self.endpoint, limit);

        tracing::debug!("Search for {:?} returned {} results", query, results.len());

        Ok(results)
    }
}

/// Pulls ranked, de-duplicated result URLs out of a results page
///
/// Relative links are resolved against `base`, redirect wrappers are
/// unwrapped, links back to the search engine itself are dropped, and only
/// http(s) URLs are kept.
pub fn extract_result_links(html: &str, selector: &Selector, base: &Url, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for element in document.select(selector) {
        if results.len() >= limit {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Ok(resolved) = base.join(href.trim()) else {
            continue;
        };

        let target = unwrap_redirect(&resolved).unwrap_or(resolved);

        if target.scheme() != "http" && target.scheme() != "https" {
            continue;
        }
        if target.host_str().is_some() && target.host_str() == base.host_str() {
            continue;
        }

        let target = target.to_string();
        if seen.insert(target.clone()) {
            results.push(target);
        }
    }

    results
}

/// Follows `?uddg=` and `/url?q=` style redirect wrappers to their target
fn unwrap_redirect(url: &Url) -> Option<Url> {
    url.query_pairs()
        .find(|(key, _)| key == "uddg" || (url.path() == "/url" && (key == "q" || key == "url")))
        .and_then(|(_, value)| Url::parse(&value).ok())
}

/// Runs a search and replaces the URL list with its results
///
/// # Returns
///
/// The number of URLs written
pub async fn search_and_persist(
    config: &Config,
    query: &str,
    limit: usize,
) -> Result<usize, TrawlError> {
    let client = SearchClient::new(config)?;
    let results = client.search(query, limit).await?;

    write_url_list(Path::new(&config.files.url_list), &results)?;

    Ok(results.len())
}
