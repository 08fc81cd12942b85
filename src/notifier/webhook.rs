//! HTTP webhook notifier.
//!
//! # Responsibilities
//! - POST the failure message as JSON to a configured endpoint
//! - Bound every delivery with a request timeout
//! - Log and count delivery failures without surfacing them

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::notifier::{FailureMessage, Notifier};
use crate::observability::metrics;

/// Delivers failure messages to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    name: String,
    url: Url,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a webhook notifier with its own HTTP client.
    pub fn new(name: impl Into<String>, url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scaling-failsafe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            name: name.into(),
            url,
            client,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_notification(&self, message: &FailureMessage) {
        let result = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(notifier = %self.name, status = %response.status(), "Webhook notification delivered");
            }
            Ok(response) => {
                tracing::warn!(
                    notifier = %self.name,
                    url = %self.url,
                    status = %response.status(),
                    "Webhook notification rejected"
                );
                metrics::record_notifier_failure(&self.name);
            }
            Err(e) => {
                tracing::warn!(notifier = %self.name, url = %self.url, error = %e, "Webhook notification failed");
                metrics::record_notifier_failure(&self.name);
            }
        }
    }
}
