//! Failsafe circuit breaker.
//!
//! # States
//! - Closed: scaling evaluations and operations are permitted
//! - Open: failsafe mode; nothing scales on any running daemon
//!
//! # State Transitions
//! ```text
//! Closed → Open: explicit trip (notify once, persist)
//! Open → Closed: explicit reset by an operator (persist, no notification)
//! ```
//!
//! # Design Decisions
//! - Global breaker, shared by every daemon through the state store
//! - Fail fast in Open state: no threshold evaluation, no side effects
//! - Never resets itself; a human clears it
//! - Resource failure notifications are independent of the breaker state

pub mod breaker;
pub mod config;
pub mod resource;

pub use breaker::{CircuitBreaker, Initiator};
pub use config::{BreakerConfig, NotificationConfig};
pub use resource::{FailureNotifier, ResourceKind};
