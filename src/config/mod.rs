//! Configuration module for Mailtrawl
//!
//! Tunables (delays, file locations, endpoints) come from an optional TOML
//! file; secrets (SMTP credentials, completion API key) come from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use mailtrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mailtrawl.toml")).unwrap();
//! println!("Emails are stored in: {}", config.files.email_store);
//! ```

mod env;
mod parser;
mod types;
mod validation;

// Re-export types
pub use env::{CompletionSettings, SmtpSettings};
pub use types::{
    CompletionConfig, Config, CrawlerConfig, FilesConfig, SearchConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
