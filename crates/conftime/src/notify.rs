//! Completion notifications.
//!
//! When a user finishes the booth tour a [`CompletionReport`] is handed to a
//! [`CompletionNotifier`] (in production, a spreadsheet webhook). Delivery is
//! fire-and-forget: failures are logged, never surfaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booth::BoothVisit;
use crate::completion::Progress;

/// Payload describing one completed booth tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub timestamp: DateTime<Utc>,
    pub email: String,
    pub visits: Vec<BoothVisit>,
    pub completion_percentage: u8,
}

impl CompletionReport {
    pub fn new(
        timestamp: DateTime<Utc>,
        email: &str,
        visits: &[BoothVisit],
        progress: Progress,
    ) -> Self {
        let mut visits = visits.to_vec();
        visits.sort_by_key(|v| v.visited_at);
        Self {
            timestamp,
            email: email.to_string(),
            visits,
            completion_percentage: progress.percentage(),
        }
    }
}

pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

/// Destination for completion reports.
pub trait CompletionNotifier {
    fn notify(&self, report: &CompletionReport) -> Result<(), NotifyError>;
}

/// Send `report`, logging instead of returning any failure.
pub fn dispatch<N: CompletionNotifier + ?Sized>(notifier: &N, report: &CompletionReport) -> bool {
    match notifier.notify(report) {
        Ok(()) => {
            tracing::info!(email = %report.email, "completion notification sent");
            true
        }
        Err(err) => {
            tracing::warn!(email = %report.email, error = %err, "completion notification failed");
            false
        }
    }
}

/// Notifier that only logs the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, report: &CompletionReport) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(report)?;
        tracing::info!(%payload, "completion report (no webhook configured)");
        Ok(())
    }
}
