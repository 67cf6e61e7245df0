//! Export command implementation
//!
//! This module implements the `export` command for exporting accounting
//! journals to CSV chunks.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::core::fetch::FetchCriteria;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Accounting from date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from_date: String,

    /// Accounting to date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to_date: String,

    /// As-of effective date snapshot filter
    #[arg(long, value_name = "DATE")]
    pub as_of_effective_date: Option<String>,

    /// As-of entry datetime snapshot filter
    #[arg(long, value_name = "DATETIME")]
    pub as_of_entry_datetime: Option<String>,

    /// Export only this page of the range instead of the full batch
    #[arg(long, value_name = "PAGE")]
    pub page: Option<u32>,

    /// Dry run mode - fetch and map without writing CSV files
    #[arg(long)]
    pub dry_run: bool,

    /// Override output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            from = %self.from_date,
            to = %self.to_date,
            "Starting export command"
        );

        let mut config = load_config(config_path)?;

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }

        let criteria = FetchCriteria {
            accounting_from_date: Some(self.from_date.clone()),
            accounting_to_date: Some(self.to_date.clone()),
            as_of_effective_date: self.as_of_effective_date.clone(),
            as_of_entry_datetime: self.as_of_entry_datetime.clone(),
        };

        let coordinator = ExportCoordinator::new(config);
        let summary = match self.page {
            Some(page) => coordinator.execute_export_page(&criteria, page).await?,
            None => coordinator.execute_export(&criteria).await?,
        };

        println!("Export finished in {:.1?}", summary.duration);
        println!("  journals mapped : {}", summary.journals_fetched);
        println!("  entries written : {}", summary.entries_written);
        println!("  csv chunks      : {}", summary.chunks.len());
        println!(
            "  completeness    : {}",
            if summary.complete {
                "all reported records fetched".to_string()
            } else {
                format!(
                    "{} fetched of {} reported",
                    summary.journals_fetched, summary.total_reported
                )
            }
        );
        for path in &summary.output_files {
            println!("  wrote {}", path.display());
        }

        if summary.has_failures() {
            println!("  failures        : {}", summary.failures.len());
            for failure in &summary.failures {
                println!(
                    "    - {}: {}",
                    failure.journal_id.as_deref().unwrap_or("<unknown>"),
                    failure.reason
                );
            }
            // partial failures are not fatal, signal them distinctly
            return Ok(3);
        }

        Ok(0)
    }
}
