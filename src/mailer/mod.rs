//! Outbound mail delivery
//!
//! The [`Mailer`] trait is the seam between dispatch and the SMTP transport,
//! so delivery can be exercised without a relay.

mod dispatch;
mod smtp;

pub use dispatch::{dedupe_addresses, dispatch_all, DispatchReport};
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Sends one plain-text message to one recipient
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}
