//! Journal mapping pipeline
//!
//! [`JournalMapper`] converts one parsed [`JournalEntry`] into the
//! normalized [`MappedJournal`] shape by joining every line against the
//! pre-fetched reference dictionaries and three on-demand lookups (expense
//! type by spend category, deal by customer contract, vendor by supplier),
//! all cached across the batch by their engines.
//!
//! Resolution is tolerant by design: a dictionary miss or an id the remote
//! side no longer knows yields `None` for that field, never an error. Only
//! a structurally unusable journal (missing ledger or source reference)
//! fails mapping, and that failure is isolated to the one journal.

use crate::adapters::workday::services::customer_contracts::CustomerContractAdapter;
use crate::adapters::workday::services::spend_categories::SpendCategoryAdapter;
use crate::adapters::workday::services::suppliers::SupplierAdapter;
use crate::core::fetch::{FetchCriteria, FetchEngine};
use crate::domain::journal::{JournalEntry, JournalEntryLine};
use crate::domain::mapped::{
    AccountInfo, AmountInfo, DocumentInfo, MappedEntryJournal, MappedJournal, RevenueInfo,
};
use crate::domain::reference::{
    CostCenterInfo, GeoSales, LedgerAccount, SubsidiaryInfo,
};
use crate::domain::{AbacusError, Result, WorkdayError};
use std::collections::HashMap;

/// Read-only reference dictionaries for one batch
#[derive(Debug, Default)]
pub struct ReferenceData {
    /// Keyed by ledger account id
    pub ledger_accounts: HashMap<String, LedgerAccount>,
    /// Keyed by cost center code
    pub cost_centers: HashMap<String, CostCenterInfo>,
    /// Keyed by company reference id
    pub subsidiaries: HashMap<String, SubsidiaryInfo>,
    /// Keyed by dimension reference id
    pub gtm_orgs: HashMap<String, GeoSales>,
}

/// Per-batch mapper from parsed journals to the normalized output shape
pub struct JournalMapper {
    references: ReferenceData,
    spend_categories: FetchEngine<SpendCategoryAdapter>,
    customer_contracts: FetchEngine<CustomerContractAdapter>,
    suppliers: FetchEngine<SupplierAdapter>,
}

impl JournalMapper {
    pub fn new(
        references: ReferenceData,
        spend_categories: FetchEngine<SpendCategoryAdapter>,
        customer_contracts: FetchEngine<CustomerContractAdapter>,
        suppliers: FetchEngine<SupplierAdapter>,
    ) -> Self {
        Self {
            references,
            spend_categories,
            customer_contracts,
            suppliers,
        }
    }

    /// Map one journal; exactly one output entry per input line
    pub async fn map(&mut self, journal: &JournalEntry) -> Result<MappedJournal> {
        let journal_id = journal.journal_id().map(str::to_string);

        let ledger = journal.ledger_reference.as_ref().ok_or_else(|| {
            AbacusError::Mapping(format!(
                "journal {} has no ledger reference",
                journal_id.as_deref().unwrap_or("<unknown>")
            ))
        })?;
        let source = journal.journal_source_reference.as_ref().ok_or_else(|| {
            AbacusError::Mapping(format!(
                "journal {} has no journal source reference",
                journal_id.as_deref().unwrap_or("<unknown>")
            ))
        })?;

        let account_info = AccountInfo {
            code: ledger.ledger_reference_id.clone(),
            ..AccountInfo::default()
        };
        let document_info = DocumentInfo {
            document_number: journal.journal_sequence_number.clone(),
            description: journal.description.clone(),
        };

        let mut mapped_entries = Vec::with_capacity(journal.journal_entry_lines.len());
        for line in &journal.journal_entry_lines {
            mapped_entries.push(self.map_line(line).await?);
        }
        debug_assert_eq!(mapped_entries.len(), journal.journal_entry_lines.len());

        Ok(MappedJournal {
            journal_id,
            account_info,
            document_info,
            book_code_info: journal.book_code.clone(),
            pl_info_destination: journal.custom_worktag_4_id.clone(),
            accounting_period_name: journal.accounting_date.clone(),
            journal_source: source.journal_source_id.clone(),
            mapped_entries,
        })
    }

    async fn map_line(&mut self, line: &JournalEntryLine) -> Result<MappedEntryJournal> {
        let worktags = &line.worktags_reference;
        let criteria = FetchCriteria::none();

        // 1. Ledger account from the pre-fetched dictionary
        let ledger_account = line
            .ledger_account_reference
            .as_ref()
            .and_then(|r| r.ledger_account_id.as_deref())
            .and_then(|id| self.references.ledger_accounts.get(id))
            .cloned();

        // 2. Subsidiary by the line company
        let subsidiary_info = line
            .line_company_reference
            .as_ref()
            .and_then(|r| r.company_reference_id.as_deref())
            .and_then(|id| self.references.subsidiaries.get(id))
            .cloned();

        // 3. Cost center worktag
        let cost_center_info = worktags
            .cost_center_reference_id
            .as_deref()
            .and_then(|id| self.references.cost_centers.get(id))
            .cloned();

        // 4. Expense type, remote lookup only when the worktag is present
        let expense_type = match &worktags.spend_category_id {
            Some(id) => {
                absorb_unmatched(self.spend_categories.get_entity(id, &criteria).await, id)?
            }
            None => None,
        };

        // 5. GTM organization dimension
        let gtm_org = worktags
            .custom_organization_reference_id
            .as_deref()
            .and_then(|id| self.references.gtm_orgs.get(id))
            .cloned();

        // 6. Deal, remote lookup only when the worktag is present
        let deal = match &worktags.customer_contract_reference_id {
            Some(id) => {
                absorb_unmatched(self.customer_contracts.get_entity(id, &criteria).await, id)?
            }
            None => None,
        };

        // 7. Vendor; an absent supplier worktag makes no call at all
        let supplier_id = worktags.supplier_id.as_deref().unwrap_or("");
        let vendor_info =
            absorb_unmatched(self.suppliers.get_entity(supplier_id, &criteria).await, supplier_id)?;

        let amount_info = AmountInfo {
            debit: line.debit_amount,
            credit: line.credit_amount,
            ledger_debit: line.ledger_debit_amount,
            ledger_credit: line.ledger_credit_amount,
            currency_symbol: line
                .currency_reference
                .as_ref()
                .and_then(|c| c.currency_id.clone()),
        };

        let revenue_info = RevenueInfo {
            gtm_org,
            deal,
            revenue_name: worktags.revenue_category_id.clone(),
        };

        // 8. Pass-through scalars
        Ok(MappedEntryJournal {
            ledger_account,
            subsidiary_info,
            amount_info,
            cost_center_info,
            revenue_info,
            vendor_info,
            expense_type,
            project_code: worktags.project_id.clone(),
            memo: line.memo.clone(),
            cash_flow_code: worktags.cash_flow_code.clone(),
            customer_id: worktags.customer_id.clone(),
        })
    }
}

/// Treat a zero-match single-record lookup as an absent reference
///
/// An id the remote side no longer knows resolves to `None` for the line.
/// A multi-match response stays a consistency error and fails the journal.
fn absorb_unmatched<T>(result: Result<Option<T>>, id: &str) -> Result<Option<T>> {
    match result {
        Err(AbacusError::Workday(WorkdayError::Cardinality { kind, count: 0 })) => {
            tracing::warn!(kind = kind, id = id, "No upstream match for reference lookup");
            Ok(None)
        }
        other => other,
    }
}
