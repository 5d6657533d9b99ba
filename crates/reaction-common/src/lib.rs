//! # reaction-common
//!
//! Shared utilities including configuration, CSRF handling, viewer notices, and telemetry.

pub mod config;
pub mod csrf;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppSettings, ClientConfig, ConfigError, CsrfConfig, Environment, ServerConfig, SyncConfig,
};
pub use csrf::CsrfToken;
pub use error::Notice;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
