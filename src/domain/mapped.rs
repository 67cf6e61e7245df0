//! Normalized output model
//!
//! A [`MappedJournal`] is the downstream-facing shape of one journal entry:
//! journal-level fields plus exactly one [`MappedEntryJournal`] per input
//! line, each composed from the reference records the mapping pipeline
//! resolved for that line.

use serde::{Deserialize, Serialize};

use super::reference::{
    BookCodeInfo, CostCenterInfo, DealInfo, GeoSales, LedgerAccount, SpendCategory, SubsidiaryInfo,
    VendorInfo,
};

/// Journal-level account identification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub code: Option<String>,
    pub name: Option<String>,
    pub account_type: Option<String>,
}

/// Amounts of one mapped line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountInfo {
    /// In transaction (foreign) currency
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    /// Converted to the ledger (functional) currency
    pub ledger_debit: Option<f64>,
    pub ledger_credit: Option<f64>,

    pub currency_symbol: Option<String>,
}

/// Journal-level document identification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub document_number: Option<String>,
    pub description: Option<String>,
}

/// Revenue dimensions of one mapped line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueInfo {
    pub gtm_org: Option<GeoSales>,
    pub deal: Option<DealInfo>,
    pub revenue_name: Option<String>,
}

/// One normalized output line (strictly one per input journal line)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedEntryJournal {
    pub ledger_account: Option<LedgerAccount>,
    pub subsidiary_info: Option<SubsidiaryInfo>,
    pub amount_info: AmountInfo,
    pub cost_center_info: Option<CostCenterInfo>,
    pub revenue_info: RevenueInfo,
    pub vendor_info: Option<VendorInfo>,
    pub expense_type: Option<SpendCategory>,

    // Pass-through scalars
    pub project_code: Option<String>,
    pub memo: Option<String>,
    pub cash_flow_code: Option<String>,
    pub customer_id: Option<String>,
}

/// One normalized output journal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedJournal {
    pub account_info: AccountInfo,
    pub document_info: DocumentInfo,
    pub book_code_info: Option<BookCodeInfo>,
    pub mapped_entries: Vec<MappedEntryJournal>,

    pub journal_id: Option<String>,
    /// P&L destination tag
    pub pl_info_destination: Option<String>,
    /// The accounting date, used downstream as the period name
    pub accounting_period_name: Option<String>,
    pub journal_source: Option<String>,
}
