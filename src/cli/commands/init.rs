//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "abacus.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            eprintln!("Configuration file already exists: {}", self.output);
            eprintln!("Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::template()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your tenant settings", self.output);
                println!("  2. Export ABACUS_CLIENT_SECRET and ABACUS_REFRESH_TOKEN");
                println!("     (or put them in a .env file)");
                println!("  3. Validate: abacus validate-config");
                println!("  4. Run: abacus export --from-date 2024-10-01 --to-date 2024-10-31");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to write configuration file: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration template
    fn template() -> &'static str {
        r#"# Abacus configuration
# Workday accounting journal export tool

[application]
log_level = "info"
dry_run = false

[workday]
host = "wd2-impl-services1.workday.com"
tenant = "acme_corp"
api_version = "v43.1"
client_id = "your-client-id"
client_secret = "${ABACUS_CLIENT_SECRET}"
refresh_token = "${ABACUS_REFRESH_TOKEN}"
timeout_seconds = 120
page_size = 999

[workday.retry]
max_attempts = 2
delay_ms = 5000

[export]
chunk_rows = 40000
repeat_header = true
output_dir = "./out"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abacus.toml");

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            force: false,
        };
        let code = args.execute().await.unwrap();

        assert_eq!(code, 0);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[workday]"));
        assert!(written.contains("page_size = 999"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abacus.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            force: false,
        };
        let code = args.execute().await.unwrap();

        assert_eq!(code, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }
}
