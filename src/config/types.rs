use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Mailtrawl
///
/// Every section and key has a default, so an empty (or absent) file yields a
/// usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub files: FilesConfig,
    pub search: SearchConfig,
    pub completion: CompletionConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hard timeout applied to every HTTP request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Number of attempts made for a page before giving up
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Backoff base; the n-th failure waits `base * 2^(n-1)` (milliseconds)
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Courtesy pause after every successful page fetch (milliseconds)
    #[serde(rename = "polite-delay-ms")]
    pub polite_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn polite_delay(&self) -> Duration {
        Duration::from_millis(self.polite_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            max_retries: 3,
            base_delay_ms: 2_000,
            polite_delay_ms: 2_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl UserAgentConfig {
    /// Formats the identity header as `Name/Version (+ContactURL; ContactEmail)`
    ///
    /// The parenthesised part only lists the contact details that are set.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "mailtrawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

/// Locations of the flat files shared between stages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Newline-delimited list of candidate URLs written by search
    #[serde(rename = "url-list")]
    pub url_list: String,

    /// CSV email store appended to by the collector
    #[serde(rename = "email-store")]
    pub email_store: String,

    /// Plain-text background handed to the completion endpoint
    pub context: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            url_list: "websites.txt".to_string(),
            email_store: "emails.csv".to_string(),
            context: "context.txt".to_string(),
        }
    }
}

/// Search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// HTML results page queried with `q=<query>`
    pub endpoint: String,

    /// CSS selector matching result anchors on the results page
    #[serde(rename = "result-selector")]
    pub result_selector: String,

    /// Query used when none is given on the command line
    #[serde(rename = "default-query")]
    pub default_query: String,

    /// Result count used when `--search` is given without a value
    #[serde(rename = "default-limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            result_selector: "a.result__a".to_string(),
            default_query: String::new(),
            default_limit: 10,
        }
    }
}

/// Completion endpoint configuration (the API key comes from the environment)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(rename = "base-url")]
    pub base_url: String,

    pub model: String,

    #[serde(rename = "system-prompt")]
    pub system_prompt: String,

    /// Hard timeout for the completion request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl CompletionConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mistral.ai/v1".to_string(),
            model: "open-mistral-7b".to_string(),
            system_prompt: "You are an assistant that generates professional emails.".to_string(),
            request_timeout_secs: 60,
        }
    }
}
