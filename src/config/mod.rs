//! Configuration management
//!
//! TOML-backed configuration with `${VAR}` substitution, `ABACUS_*`
//! environment overrides, per-section validation, and secret-wrapped
//! credentials.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    AbacusConfig, ApplicationConfig, Environment, ExportConfig, LoggingConfig, RetryConfig,
    WorkdayConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
