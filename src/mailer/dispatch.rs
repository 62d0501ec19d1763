use crate::mailer::Mailer;
use std::collections::HashSet;
use std::fmt;

/// Outcome of a dispatch pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: Vec<String>,
    /// Recipient and the reason delivery failed
    pub failed: Vec<(String, String)>,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.sent.len() + self.failed.len()
    }
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dispatch Report ===")?;
        writeln!(f, "Sent: {}", self.sent.len())?;
        write!(f, "Failed: {}", self.failed.len())?;
        for (address, reason) in &self.failed {
            write!(f, "\n  {}: {}", address, reason)?;
        }
        Ok(())
    }
}

/// Collapses repeated addresses, keeping the order of first appearance
pub fn dedupe_addresses(addresses: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    addresses
        .into_iter()
        .filter(|address| seen.insert(address.clone()))
        .collect()
}

/// Sends the same message to every address in order
///
/// A failure for one recipient is logged and recorded; delivery continues
/// with the next.
pub async fn dispatch_all<M: Mailer + ?Sized>(
    mailer: &M,
    addresses: &[String],
    subject: &str,
    body: &str,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for address in addresses {
        match mailer.send(address, subject, body).await {
            Ok(()) => {
                tracing::info!("Email sent to {}", address);
                report.sent.push(address.clone());
            }
            Err(e) => {
                tracing::error!("Error sending email to {}: {}", address, e);
                report.failed.push((address.clone(), e.to_string()));
            }
        }
    }

    report
}
