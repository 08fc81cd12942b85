//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build store + notifiers → BreakerConfig
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Evaluation loop exits after its current tick
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Shutdown never interrupts an in-flight failsafe transition

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
