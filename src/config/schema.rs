//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the failsafe
//! daemon. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the failsafe daemon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FailsafeConfig {
    /// Circuit breaker settings.
    pub breaker: BreakerSettings,

    /// Failure notification settings.
    pub notification: NotificationSettings,

    /// Shared state persistence.
    pub state_store: StateStoreConfig,

    /// Evaluation loop settings.
    pub daemon: DaemonConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Circuit breaker settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerSettings {
    /// Consecutive node failures that would trip the breaker.
    pub retry_threshold: u32,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self { retry_threshold: 3 }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Alert UID attached to cluster failsafe notifications.
    pub cluster_scaling_uid: String,

    /// Cluster name used in messages and as the state store key.
    pub cluster_identifier: String,

    /// Notification backends, invoked in the listed order.
    pub notifiers: Vec<NotifierConfig>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            cluster_scaling_uid: String::new(),
            cluster_identifier: "default".to_string(),
            notifiers: Vec::new(),
        }
    }
}

/// A single notification backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// Report failures through the log sink.
    Log,

    /// POST failures as JSON to an HTTP endpoint.
    Webhook {
        /// Label for logs and metrics (defaults to "webhook").
        #[serde(default = "default_webhook_name")]
        name: String,

        /// Endpoint URL.
        url: String,

        /// Request timeout in seconds.
        #[serde(default = "default_webhook_timeout")]
        timeout_secs: u64,
    },
}

fn default_webhook_name() -> String {
    "webhook".to_string()
}

fn default_webhook_timeout() -> u64 {
    5
}

/// Which state store backend to use.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StateStoreBackend {
    /// JSON snapshots on a (possibly shared) filesystem.
    #[default]
    File,
    /// In-process only; state is lost on exit.
    Memory,
}

/// State store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StateStoreConfig {
    pub backend: StateStoreBackend,

    /// Directory holding state snapshots (file backend).
    pub path: PathBuf,
}

impl Default for StateStoreConfig {
    fn default() -> Self {
        Self {
            backend: StateStoreBackend::File,
            path: PathBuf::from("/var/lib/scaling-failsafe"),
        }
    }
}

/// Evaluation loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Seconds between scaling evaluations.
    pub evaluation_interval_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
