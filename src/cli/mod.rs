//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Abacus using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Abacus - Workday accounting journal export tool
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(version, about, long_about = None)]
#[command(author = "Abacus Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "abacus.toml", env = "ABACUS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ABACUS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export journals for an accounting date range to CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "abacus",
            "export",
            "--from-date",
            "2024-10-01",
            "--to-date",
            "2024-10-28",
        ]);
        assert_eq!(cli.config, "abacus.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "abacus",
            "--config",
            "custom.toml",
            "export",
            "--from-date",
            "2024-10-01",
            "--to-date",
            "2024-10-28",
        ]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["abacus", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["abacus", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["abacus", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
