//! Parsed journal entry model
//!
//! These types mirror the shape of a `Journal_Entry_Data` node as delivered
//! by the Get_Journals operation: one [`JournalEntry`] per accounting
//! transaction, with an ordered list of debit/credit [`JournalEntryLine`]s
//! and the typed reference sub-objects the wire format nests under it.
//!
//! Every field is optional: an absent node on the wire yields `None`, never
//! a parse error. Dates are kept as the ISO strings the tenant sends.

use serde::{Deserialize, Serialize};

use super::reference::BookCodeInfo;

/// Reference to the journal entry itself (`Journal_Entry_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryReference {
    pub wid: Option<String>,
    pub accounting_journal_id: Option<String>,
}

/// Journal posting status (`Journal_Status_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalStatusReference {
    pub wid: Option<String>,
    pub journal_entry_status_id: Option<String>,
}

/// Owning company of the journal (`Company_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyReference {
    pub wid: Option<String>,
    pub organization_reference_id: Option<String>,
    pub company_reference_id: Option<String>,
}

/// Transaction currency (`Currency_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyReference {
    pub wid: Option<String>,
    pub currency_id: Option<String>,
    pub currency_numeric_code: Option<String>,
}

/// Ledger the journal posts to (`Ledger_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerReference {
    pub wid: Option<String>,
    pub ledger_reference_id: Option<String>,
}

/// Originating subsystem (`Journal_Source_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSourceReference {
    pub journal_source_id: Option<String>,
}

/// Accounting period (`Ledger_Period_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerPeriodReference {
    pub wid: Option<String>,
}

/// Company reference on an individual line (`Line_Company_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCompanyReference {
    pub wid: Option<String>,
    pub organization_reference_id: Option<String>,
    pub company_reference_id: Option<String>,
}

/// Ledger account reference on a line (`Ledger_Account_Reference`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerAccountReference {
    pub wid: Option<String>,
    pub ledger_account_id: Option<String>,
}

/// Merged worktag dimensions of one journal line
///
/// A line carries zero or more repeated `Worktags_Reference` nodes, each
/// contributing one dimension. Parsing merges them all into a single
/// `WorktagsReference`; dimensions never present stay `None` - that is not
/// an error. A later node only contributes dimensions not already set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorktagsReference {
    /// Cost center code
    pub cost_center_reference_id: Option<String>,
    /// GTM organization dimension
    pub custom_organization_reference_id: Option<String>,
    /// Vendor code
    pub supplier_id: Option<String>,
    /// Project code
    pub project_id: Option<String>,
    /// Expense type
    pub spend_category_id: Option<String>,
    /// Revenue class name
    pub revenue_category_id: Option<String>,
    /// Deal dimension
    pub customer_contract_reference_id: Option<String>,
    /// Custom worktag 03
    pub cash_flow_code: Option<String>,
    pub customer_id: Option<String>,
}

impl WorktagsReference {
    /// Merge dimensions from `other`, keeping dimensions already set
    pub fn merge(&mut self, other: WorktagsReference) {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.is_none() {
                *slot = value;
            }
        }
        fill(&mut self.cost_center_reference_id, other.cost_center_reference_id);
        fill(
            &mut self.custom_organization_reference_id,
            other.custom_organization_reference_id,
        );
        fill(&mut self.supplier_id, other.supplier_id);
        fill(&mut self.project_id, other.project_id);
        fill(&mut self.spend_category_id, other.spend_category_id);
        fill(&mut self.revenue_category_id, other.revenue_category_id);
        fill(
            &mut self.customer_contract_reference_id,
            other.customer_contract_reference_id,
        );
        fill(&mut self.cash_flow_code, other.cash_flow_code);
        fill(&mut self.customer_id, other.customer_id);
    }
}

/// One debit/credit line of a journal entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub line_company_reference: Option<LineCompanyReference>,
    pub ledger_account_reference: Option<LedgerAccountReference>,
    pub currency_reference: Option<CurrencyReference>,
    pub worktags_reference: WorktagsReference,

    /// Amount in transaction currency
    pub debit_amount: Option<f64>,
    pub credit_amount: Option<f64>,

    pub currency_rate: Option<f64>,

    /// Amount converted to the ledger (functional) currency
    pub ledger_debit_amount: Option<f64>,
    pub ledger_credit_amount: Option<f64>,

    pub exclude_from_spend_report: Option<i64>,
    pub journal_line_number: Option<i64>,

    pub memo: Option<String>,
}

/// One accounting transaction with its lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub journal_number: Option<String>,
    pub journal_sequence_number: Option<String>,
    pub accounting_date: Option<String>,
    pub record_quantity: Option<i64>,
    pub total_ledger_debits: Option<f64>,
    pub total_ledger_credits: Option<f64>,
    pub creation_date: Option<String>,
    pub last_updated_date: Option<String>,
    pub description: Option<String>,
    /// P&L destination tag
    pub custom_worktag_4_id: Option<String>,

    /// Book code joined against the pre-fetched book-code dictionary
    pub book_code: Option<BookCodeInfo>,
    pub journal_entry_reference: JournalEntryReference,
    pub journal_status_reference: Option<JournalStatusReference>,
    pub company_reference: Option<CompanyReference>,
    pub currency_reference: Option<CurrencyReference>,
    pub ledger_reference: Option<LedgerReference>,
    pub journal_source_reference: Option<JournalSourceReference>,
    pub ledger_period_reference: Option<LedgerPeriodReference>,

    pub journal_entry_lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// The journal's business identifier, when one was extractable
    pub fn journal_id(&self) -> Option<&str> {
        self.journal_entry_reference.accounting_journal_id.as_deref()
    }
}
