//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Breaker transitions, notifications, evaluation loop:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metric updates are no-ops until an exporter is installed
//! - Level configurable via config, overridable with RUST_LOG

pub mod logging;
pub mod metrics;
