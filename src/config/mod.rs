//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FailsafeConfig (validated, immutable)
//!     → lifecycle::startup builds the runtime BreakerConfig
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FailsafeConfig;
pub use schema::{
    BreakerSettings, DaemonConfig, LogFormat, NotificationSettings, NotifierConfig,
    ObservabilityConfig, StateStoreBackend, StateStoreConfig,
};
