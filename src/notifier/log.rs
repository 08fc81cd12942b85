//! Notifier that reports failures to the structured log sink.

use async_trait::async_trait;

use crate::notifier::{FailureMessage, Notifier};

/// Emits every failure message as an error-level log event.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send_notification(&self, message: &FailureMessage) {
        tracing::error!(
            alert_uid = %message.alert_uid,
            cluster = %message.cluster_identifier,
            reason = %message.reason,
            failed_resource = %message.failed_resource,
            "Failure notification"
        );
    }
}
