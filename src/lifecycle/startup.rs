//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the configured state store
//! - Build notifier backends in configured order
//! - Assemble the runtime BreakerConfig

use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::schema::{FailsafeConfig, NotifierConfig, StateStoreBackend, StateStoreConfig};
use crate::error::{FailsafeError, FailsafeResult};
use crate::failsafe::{BreakerConfig, NotificationConfig};
use crate::notifier::{LogNotifier, Notifier, WebhookNotifier};
use crate::store::{FileStateStore, MemoryStateStore, StateStore};

/// Build the state store selected by configuration.
pub fn build_store(config: &StateStoreConfig) -> Arc<dyn StateStore> {
    match config.backend {
        StateStoreBackend::File => Arc::new(FileStateStore::new(config.path.clone())),
        StateStoreBackend::Memory => {
            tracing::warn!("Using in-memory state store; failsafe state is not shared between processes");
            Arc::new(MemoryStateStore::new())
        }
    }
}

/// Build notifier backends in configured order.
pub fn build_notifiers(configs: &[NotifierConfig]) -> FailsafeResult<Vec<Arc<dyn Notifier>>> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::with_capacity(configs.len());

    for config in configs {
        match config {
            NotifierConfig::Log => notifiers.push(Arc::new(LogNotifier)),
            NotifierConfig::Webhook { name, url, timeout_secs } => {
                let url = Url::parse(url)
                    .map_err(|e| FailsafeError::Config(format!("invalid webhook URL '{}': {}", url, e)))?;
                let notifier = WebhookNotifier::new(name.clone(), url, Duration::from_secs(*timeout_secs))
                    .map_err(|e| FailsafeError::Config(format!("failed to build webhook client: {}", e)))?;
                notifiers.push(Arc::new(notifier));
            }
        }
    }

    Ok(notifiers)
}

/// Assemble the runtime breaker configuration from validated settings.
pub fn build_breaker_config(config: &FailsafeConfig) -> FailsafeResult<BreakerConfig> {
    let notifiers = build_notifiers(&config.notification.notifiers)?;

    tracing::info!(
        cluster = %config.notification.cluster_identifier,
        notifiers = notifiers.len(),
        store = ?config.state_store.backend,
        "Failsafe breaker configured"
    );

    Ok(BreakerConfig {
        retry_threshold: config.breaker.retry_threshold,
        notification: NotificationConfig {
            cluster_scaling_uid: config.notification.cluster_scaling_uid.clone(),
            cluster_identifier: config.notification.cluster_identifier.clone(),
            notifiers,
        },
        store: build_store(&config.state_store),
    })
}
