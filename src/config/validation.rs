//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0)
//! - Check notifier endpoints and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FailsafeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;
use url::Url;

use crate::config::schema::{FailsafeConfig, NotifierConfig, StateStoreBackend};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &FailsafeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let notification = &config.notification;

    if notification.cluster_identifier.trim().is_empty() {
        errors.push(ValidationError::new(
            "notification.cluster_identifier",
            "must not be empty",
        ));
    }

    if !notification.notifiers.is_empty() && notification.cluster_scaling_uid.trim().is_empty() {
        errors.push(ValidationError::new(
            "notification.cluster_scaling_uid",
            "required when notifiers are configured",
        ));
    }

    for (i, notifier) in notification.notifiers.iter().enumerate() {
        if let NotifierConfig::Webhook { url, timeout_secs, .. } = notifier {
            let field = format!("notification.notifiers[{}]", i);
            match Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => errors.push(ValidationError::new(
                    format!("{}.url", field),
                    format!("unsupported scheme '{}'", parsed.scheme()),
                )),
                Err(e) => errors.push(ValidationError::new(
                    format!("{}.url", field),
                    format!("invalid URL '{}': {}", url, e),
                )),
            }
            if *timeout_secs == 0 {
                errors.push(ValidationError::new(
                    format!("{}.timeout_secs", field),
                    "must be greater than 0",
                ));
            }
        }
    }

    if config.state_store.backend == StateStoreBackend::File
        && config.state_store.path.as_os_str().is_empty()
    {
        errors.push(ValidationError::new(
            "state_store.path",
            "required for the file backend",
        ));
    }

    if config.daemon.evaluation_interval_secs == 0 {
        errors.push(ValidationError::new(
            "daemon.evaluation_interval_secs",
            "must be greater than 0",
        ));
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", observability.log_level),
        ));
    }
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
