//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the
//! `abacus.toml` file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Abacus configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbacusConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Workday tenant configuration
    pub workday: WorkdayConfig,

    /// Export settings
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AbacusConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.workday.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (don't write CSV files to disk)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for transient (5xx) transport failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Workday tenant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkdayConfig {
    /// Tenant hostname, e.g. "wd2-impl-services1.workday.com"
    pub host: String,

    /// Tenant name, e.g. "acme_corp"
    pub tenant: String,

    /// Web-services API version, e.g. "v43.1"
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// OAuth2 client id
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: SecretString,

    /// OAuth2 refresh token
    pub refresh_token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry policy for 5xx responses
    #[serde(default)]
    pub retry: RetryConfig,
}

impl WorkdayConfig {
    /// Base URI of the tenant, e.g. "https://host"
    pub fn base_uri(&self) -> String {
        format!("https://{}", self.host)
    }

    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("workday.host must not be empty".to_string());
        }
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return Err("workday.host must be a bare hostname, without scheme".to_string());
        }
        if self.tenant.trim().is_empty() {
            return Err("workday.tenant must not be empty".to_string());
        }
        if self.client_id.trim().is_empty() {
            return Err("workday.client_id must not be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("workday.page_size must be greater than zero".to_string());
        }
        if self.retry.max_attempts == 0 {
            return Err("workday.retry.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Maximum data rows per CSV chunk
    #[serde(default = "default_chunk_rows")]
    pub chunk_rows: usize,

    /// Repeat the header line at the start of every chunk
    #[serde(default = "default_repeat_header")]
    pub repeat_header: bool,

    /// Directory CSV chunks are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_rows == 0 {
            return Err("export.chunk_rows must be greater than zero".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            chunk_rows: default_chunk_rows(),
            repeat_header: default_repeat_header(),
            output_dir: default_output_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory log files are written to
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when file logging is enabled"
                .to_string());
        }
        let valid = ["daily", "hourly"];
        if !valid.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_version() -> String {
    "v43.1".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_page_size() -> u32 {
    999
}

fn default_max_attempts() -> usize {
    2
}

fn default_retry_delay_ms() -> u64 {
    5000
}

fn default_chunk_rows() -> usize {
    40000
}

fn default_repeat_header() -> bool {
    true
}

fn default_output_dir() -> String {
    "./out".to_string()
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn sample_workday() -> WorkdayConfig {
        WorkdayConfig {
            host: "acme.workday.com".to_string(),
            tenant: "acme_corp".to_string(),
            api_version: default_api_version(),
            client_id: "client".to_string(),
            client_secret: secret_string("secret".to_string()),
            refresh_token: secret_string("token".to_string()),
            timeout_seconds: 120,
            page_size: 999,
            retry: RetryConfig::default(),
        }
    }

    #[test]
    fn test_base_uri() {
        assert_eq!(sample_workday().base_uri(), "https://acme.workday.com");
    }

    #[test]
    fn test_workday_rejects_scheme_in_host() {
        let mut config = sample_workday();
        config.host = "https://acme.workday.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_workday_rejects_zero_page_size() {
        let mut config = sample_workday();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_defaults() {
        let export = ExportConfig::default();
        assert_eq!(export.chunk_rows, 40000);
        assert!(export.repeat_header);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_application_rejects_bad_log_level() {
        let app = ApplicationConfig {
            log_level: "verbose".to_string(),
            dry_run: false,
        };
        assert!(app.validate().is_err());
    }

    #[test]
    fn test_logging_rejects_bad_rotation() {
        let logging = LoggingConfig {
            local_enabled: false,
            local_path: "./logs".to_string(),
            local_rotation: "weekly".to_string(),
        };
        assert!(logging.validate().is_err());
    }
}
