//! Configuration structs

mod client_config;

pub use client_config::{
    AppSettings, ClientConfig, ConfigError, CsrfConfig, Environment, ServerConfig, SyncConfig,
};
