//! Fan-out of a single failure event to every configured notifier.

use std::sync::Arc;

use crate::notifier::{FailureMessage, Notifier};
use crate::observability::metrics;

/// Send `message` to each notifier in order.
///
/// A notifier cannot fail the dispatch: delivery errors stay inside the
/// backend, and every remaining notifier is still invoked.
pub async fn dispatch(message: &FailureMessage, notifiers: &[Arc<dyn Notifier>]) {
    for notifier in notifiers {
        tracing::debug!(
            notifier = notifier.name(),
            reason = %message.reason,
            failed_resource = %message.failed_resource,
            "Dispatching failure notification"
        );
        notifier.send_notification(message).await;
    }

    metrics::record_notification(message.reason.as_str());
}
