//! Spreadsheet webhook delivery for completion reports.

use std::time::Duration;

use conftime::notify::{CompletionNotifier, CompletionReport, NotifyError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts each report as JSON to a webhook URL.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl CompletionNotifier for WebhookNotifier {
    fn notify(&self, report: &CompletionReport) -> Result<(), NotifyError> {
        self.client
            .post(&self.url)
            .json(report)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
