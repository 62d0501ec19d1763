//! Mailtrawl sender entry point
//!
//! Generates one outreach message from the context file and an operator
//! topic, then mails it to every address in the email store.

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use mailtrawl::compose::{generate_email, CompletionError};
use mailtrawl::config::{load_config_or_default, CompletionSettings, Config, SmtpSettings};
use mailtrawl::mailer::{dedupe_addresses, dispatch_all, SmtpMailer};
use mailtrawl::storage::{CsvEmailStore, EmailStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailtrawl sender: generated outreach to harvested addresses
#[derive(Parser, Debug)]
#[command(name = "mailtrawl-send")]
#[command(version)]
#[command(about = "Generated email sender", long_about = None)]
struct Cli {
    /// Only generate the email and show it in the terminal, without sending
    #[arg(long)]
    preview: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let topic: String = Input::new()
        .with_prompt("Describe the main content of the email")
        .allow_empty(true)
        .interact_text()?;

    let Some(content) = handle_generate(&config, &topic).await? else {
        println!("Failed to generate email content.");
        return Ok(());
    };

    if cli.preview {
        println!("\n=== EMAIL PREVIEW ===\n");
        println!("{}", content);
        println!("\n=== END OF PREVIEW ===\n");
        return Ok(());
    }

    handle_send(&config, &content).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailtrawl=info,warn"),
            1 => EnvFilter::new("mailtrawl=debug,info"),
            2 => EnvFilter::new("mailtrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Calls the completion endpoint once
///
/// Returns `None` when generation failed in a way the operator can fix
/// (missing context file, API error); the reason has already been reported.
async fn handle_generate(config: &Config, topic: &str) -> Result<Option<String>> {
    let settings = CompletionSettings::from_env()?;

    match generate_email(config, &settings, topic).await {
        Ok(content) => Ok(Some(content)),
        Err(CompletionError::ContextMissing(path)) => {
            println!("Context file not found: {}", path.display());
            Ok(None)
        }
        Err(e) => {
            tracing::error!("Email generation failed: {}", e);
            Ok(None)
        }
    }
}

/// Mails `content` to every distinct address in the store
async fn handle_send(config: &Config, content: &str) -> Result<()> {
    let store = CsvEmailStore::new(&config.files.email_store);

    let addresses = match store.load_addresses() {
        Ok(addresses) => dedupe_addresses(addresses),
        Err(e) if e.is_not_found() => {
            println!("Email file not found.");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if addresses.is_empty() {
        println!("No emails found.");
        return Ok(());
    }

    let subject: String = Input::new()
        .with_prompt("Enter the subject of the email")
        .allow_empty(true)
        .interact_text()?;

    let settings = SmtpSettings::from_env()?;
    let mailer = SmtpMailer::new(&settings)?;

    tracing::info!("Sending to {} recipients", addresses.len());
    let report = dispatch_all(&mailer, &addresses, &subject, content).await;

    println!("{}", report);

    Ok(())
}
