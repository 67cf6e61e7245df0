//! Export coordinator - main orchestrator for one batch
//!
//! Wires the whole flow together: acquire a token, preload the reference
//! dictionaries from their RAAS reports, fetch and map the journals for
//! the requested range, render and chunk the CSV output, and write the
//! chunks to disk (unless dry-run). Every remote call in the flow is
//! awaited strictly in sequence.

use crate::adapters::workday::auth::WorkdayConnector;
use crate::adapters::workday::services::customer_contracts::CustomerContractAdapter;
use crate::adapters::workday::services::journals::JournalAdapter;
use crate::adapters::workday::services::reports::{
    BookCodeReport, CompanyReport, CostCenterReport, GeoSalesReport, LedgerAccountReport,
};
use crate::adapters::workday::services::spend_categories::SpendCategoryAdapter;
use crate::adapters::workday::services::suppliers::SupplierAdapter;
use crate::adapters::workday::transport::Transport;
use crate::config::AbacusConfig;
use crate::core::csv::{mapped_journals_to_csv, split_csv_content};
use crate::core::fetch::{FetchCriteria, FetchEngine};
use crate::core::mapping::{JournalMapper, ReferenceData};
use crate::domain::mapped::MappedJournal;
use crate::domain::{AbacusError, Result};
use std::path::PathBuf;
use std::time::Instant;

/// Export coordinator for one batch
pub struct ExportCoordinator {
    config: AbacusConfig,
    base_uri_override: Option<String>,
}

impl ExportCoordinator {
    /// Create a coordinator from loaded configuration
    pub fn new(config: AbacusConfig) -> Self {
        Self {
            config,
            base_uri_override: None,
        }
    }

    /// Point the coordinator at an explicit base URI instead of the
    /// configured tenant host (testing, reverse proxies)
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri_override = Some(base_uri.into());
        self
    }

    /// Run a full export for the given criteria
    pub async fn execute_export(
        &self,
        criteria: &FetchCriteria,
    ) -> Result<super::ExportSummary> {
        let start = Instant::now();

        let mut engine = self.build_journal_engine().await?;
        let journals = engine.get_all_entities(criteria).await?;

        let mut summary = self.render_output(&journals)?;
        summary.journals_fetched = journals.len();
        summary.total_reported = engine.total_records();
        summary.complete = engine.is_complete();
        summary.failures = engine.take_failures();

        tracing::info!(
            journals = summary.journals_fetched,
            entries = summary.entries_written,
            chunks = summary.chunks.len(),
            failures = summary.failures.len(),
            complete = summary.complete,
            "Export finished"
        );

        Ok(summary.with_duration(start.elapsed()))
    }

    /// Run an export for exactly one page of the range
    ///
    /// Used when the full range is too large for one invocation.
    pub async fn execute_export_page(
        &self,
        criteria: &FetchCriteria,
        page: u32,
    ) -> Result<super::ExportSummary> {
        let start = Instant::now();
        let count = self.config.workday.page_size;

        let mut engine = self.build_journal_engine().await?;
        let journals = engine.get_all_entities_by_page(page, count, criteria).await?;

        let mut summary = self.render_output(&journals)?;
        summary.journals_fetched = journals.len();
        summary.total_reported = engine.total_records();
        summary.complete = engine.is_complete();
        summary.failures = engine.take_failures();

        tracing::info!(
            page = page,
            journals = summary.journals_fetched,
            chunks = summary.chunks.len(),
            complete = summary.complete,
            "Single-page export finished"
        );

        Ok(summary.with_duration(start.elapsed()))
    }

    /// Acquire a token, preload the dictionaries, and wire the journal
    /// engine for one batch
    async fn build_journal_engine(&self) -> Result<FetchEngine<JournalAdapter>> {
        let workday = &self.config.workday;

        let mut connector = WorkdayConnector::new(workday.clone())?;
        if let Some(uri) = &self.base_uri_override {
            connector = connector.with_base_uri(uri.clone());
        }
        let base_uri = connector.base_uri().to_string();
        connector.acquire_token().await?;

        let transport = Transport::new(
            connector.access_token()?,
            workday.timeout_seconds,
            workday.retry.clone(),
        )?;
        let tenant = workday.tenant.as_str();

        tracing::info!(tenant = tenant, "Preloading master-data dictionaries");
        let ledger_accounts = LedgerAccountReport::service(&base_uri, tenant, transport.clone())
            .get_entity_map()
            .await?;
        let cost_centers = CostCenterReport::service(&base_uri, tenant, transport.clone())
            .get_entity_map()
            .await?;
        let subsidiaries = CompanyReport::service(&base_uri, tenant, transport.clone())
            .get_entity_map()
            .await?;
        let book_codes = BookCodeReport::service(&base_uri, tenant, transport.clone())
            .get_entity_map()
            .await?;
        let gtm_orgs = GeoSalesReport::service(&base_uri, tenant, transport.clone())
            .get_entity_map()
            .await?;

        tracing::info!(
            ledger_accounts = ledger_accounts.len(),
            cost_centers = cost_centers.len(),
            subsidiaries = subsidiaries.len(),
            book_codes = book_codes.len(),
            gtm_orgs = gtm_orgs.len(),
            "Reference dictionaries loaded"
        );

        let references = ReferenceData {
            ledger_accounts,
            cost_centers,
            subsidiaries,
            gtm_orgs,
        };

        let version = workday.api_version.as_str();
        let page_size = workday.page_size;
        let mapper = JournalMapper::new(
            references,
            SpendCategoryAdapter::engine(&base_uri, tenant, version, transport.clone(), page_size),
            CustomerContractAdapter::engine(&base_uri, tenant, version, transport.clone(), page_size),
            SupplierAdapter::engine(&base_uri, tenant, version, transport.clone(), page_size),
        );

        Ok(JournalAdapter::engine(
            &base_uri,
            tenant,
            version,
            transport,
            page_size,
            book_codes,
            mapper,
        ))
    }

    /// Render the CSV, chunk it, and write the chunk files
    fn render_output(&self, journals: &[MappedJournal]) -> Result<super::ExportSummary> {
        let export = &self.config.export;
        let mut summary = super::ExportSummary::default();

        summary.entries_written = journals.iter().map(|j| j.mapped_entries.len()).sum();

        let csv_content = mapped_journals_to_csv(journals)?;
        summary.chunks = split_csv_content(&csv_content, export.chunk_rows, export.repeat_header);

        if self.config.application.dry_run {
            tracing::info!(chunks = summary.chunks.len(), "Dry run, skipping file output");
            return Ok(summary);
        }

        if !summary.chunks.is_empty() {
            std::fs::create_dir_all(&export.output_dir).map_err(|e| {
                AbacusError::Io(format!(
                    "Failed to create output directory {}: {}",
                    export.output_dir, e
                ))
            })?;
        }

        for (index, chunk) in summary.chunks.iter().enumerate() {
            let path = PathBuf::from(&export.output_dir)
                .join(format!("accounting_journal_part{:03}.csv", index + 1));
            std::fs::write(&path, chunk)?;
            tracing::debug!(path = %path.display(), "Wrote CSV chunk");
            summary.output_files.push(path);
        }

        Ok(summary)
    }
}
