//! Failure notification subsystem.
//!
//! # Data Flow
//! ```text
//! CircuitBreaker trip / FailureNotifier
//!     → message.rs (FailureMessage payload)
//!     → dispatcher.rs (fan out to every configured backend, in order)
//!     → log.rs / webhook.rs (deliver, report own failures)
//! ```
//!
//! # Design Decisions
//! - Backends are trait objects; the configured list is ordered
//! - Sends are fire-and-forget: no result reaches the caller
//! - No retries and no error aggregation

pub mod dispatcher;
pub mod log;
pub mod message;
pub mod webhook;

use async_trait::async_trait;

pub use dispatcher::dispatch;
pub use log::LogNotifier;
pub use message::{FailureMessage, FailureReason};
pub use webhook::WebhookNotifier;

/// A backend able to deliver a [`FailureMessage`] to a human or alerting system.
///
/// Implementations own their delivery failures: they log or record them and
/// never surface them to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend label used in logs and metrics.
    fn name(&self) -> &str;

    /// Deliver a failure message.
    async fn send_notification(&self, message: &FailureMessage);
}
