//! Robots.txt parser implementation
//!
//! This module wraps the robotstxt crate's matcher behind a small type that
//! also represents the blanket allow/deny outcomes derived from HTTP status.

use robotstxt::DefaultMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Policy {
    AllowAll,
    DenyAll,
    Rules(String),
}

/// Parsed robots.txt data
///
/// A wrapper around the robotstxt crate's matcher, providing a simplified
/// interface for checking if URLs are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    policy: Policy,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    ///
    /// Empty content places no restrictions.
    pub fn from_content(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::allow_all();
        }

        Self {
            policy: Policy::Rules(content.to_string()),
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// Used when the site answers robots.txt with a client error other than
    /// 401/403, i.e. it has no robots.txt.
    pub fn allow_all() -> Self {
        Self {
            policy: Policy::AllowAll,
        }
    }

    /// Creates a ParsedRobots that refuses everything
    pub fn deny_all() -> Self {
        Self {
            policy: Policy::DenyAll,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL to check; the matcher extracts the path itself
    /// * `user_agent` - The user agent token (`*` for a generic crawler)
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match &self.policy {
            Policy::AllowAll => true,
            Policy::DenyAll => false,
            Policy::Rules(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url)
            }
        }
    }
}
