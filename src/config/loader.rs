//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AbacusConfig;
use crate::domain::errors::AbacusError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AbacusConfig`]
/// 4. Applies environment variable overrides (`ABACUS_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use abacus::config::loader::load_config;
///
/// let config = load_config("abacus.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AbacusConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AbacusError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AbacusError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AbacusConfig = toml::from_str(&contents)
        .map_err(|e| AbacusError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        AbacusError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Referencing a variable that is not set
/// is an error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AbacusError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `ABACUS_*` prefix
///
/// Environment variables follow the pattern `ABACUS_<SECTION>_<KEY>`,
/// for example `ABACUS_WORKDAY_HOST` or `ABACUS_EXPORT_CHUNK_ROWS`.
fn apply_env_overrides(config: &mut AbacusConfig) {
    use crate::config::secret::secret_string;

    // Application overrides
    if let Ok(val) = std::env::var("ABACUS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ABACUS_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Workday overrides
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_HOST") {
        config.workday.host = val;
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_TENANT") {
        config.workday.tenant = val;
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_API_VERSION") {
        config.workday.api_version = val;
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_CLIENT_ID") {
        config.workday.client_id = val;
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_CLIENT_SECRET") {
        config.workday.client_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_REFRESH_TOKEN") {
        config.workday.refresh_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.workday.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_RETRY_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.workday.retry.max_attempts = attempts;
        }
    }
    if let Ok(val) = std::env::var("ABACUS_WORKDAY_RETRY_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.workday.retry.delay_ms = delay;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("ABACUS_EXPORT_CHUNK_ROWS") {
        if let Ok(rows) = val.parse() {
            config.export.chunk_rows = rows;
        }
    }
    if let Ok(val) = std::env::var("ABACUS_EXPORT_REPEAT_HEADER") {
        config.export.repeat_header = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ABACUS_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ABACUS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ABACUS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
