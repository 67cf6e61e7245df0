//! Accounting journals
//!
//! Served by the `Get_Journals` operation of the Financial_Management
//! service. [`parse_journal`] reconstructs one [`JournalEntry`] (with its
//! nested lines and merged worktags) from a `Journal_Entry_Data` node;
//! [`JournalAdapter`] plugs that parser, the request envelopes, and the
//! mapping pipeline into the fetch engine, so a full fetch yields
//! normalized [`MappedJournal`] records directly.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::core::fetch::{EngineConfig, FetchCriteria, FetchEngine, RecordAdapter};
use crate::core::mapping::JournalMapper;
use crate::domain::journal::{
    CompanyReference, CurrencyReference, JournalEntry, JournalEntryLine, JournalEntryReference,
    JournalSourceReference, JournalStatusReference, LedgerAccountReference, LedgerPeriodReference,
    LedgerReference, LineCompanyReference, WorktagsReference,
};
use crate::domain::mapped::MappedJournal;
use crate::domain::reference::BookCodeInfo;
use crate::domain::{AbacusError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use super::{as_of_filters, service_url, xml_escape};

/// Trimmed text of a direct child
fn child_text(node: &XmlNode, name: &str) -> Option<String> {
    node.child(name).and_then(|c| c.text()).map(str::to_string)
}

/// Float of a direct child; absent is `None`, malformed is an error
fn child_f64(node: &XmlNode, name: &str) -> Result<Option<f64>> {
    match node.child(name).and_then(|c| c.text()) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| AbacusError::Xml(format!("invalid number in {name}: {text}"))),
    }
}

/// Integer of a direct child; absent is `None`, malformed is an error
fn child_i64(node: &XmlNode, name: &str) -> Result<Option<i64>> {
    match node.child(name).and_then(|c| c.text()) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| AbacusError::Xml(format!("invalid integer in {name}: {text}"))),
    }
}

/// Float of the first descendant; absent is `None`, malformed is an error
fn desc_f64(node: &XmlNode, name: &str) -> Result<Option<f64>> {
    match node.text_of(name) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| AbacusError::Xml(format!("invalid number in {name}: {text}"))),
    }
}

/// Integer of the first descendant; absent is `None`, malformed is an error
fn desc_i64(node: &XmlNode, name: &str) -> Result<Option<i64>> {
    match node.text_of(name) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| AbacusError::Xml(format!("invalid integer in {name}: {text}"))),
    }
}

/// Merge one repeated worktag node into the line's dimensions
fn parse_worktag(node: &XmlNode) -> WorktagsReference {
    WorktagsReference {
        cost_center_reference_id: node.id_of_type("Cost_Center_Reference_ID"),
        custom_organization_reference_id: node.id_of_type("Custom_Organization_Reference_ID"),
        supplier_id: node.id_of_type("Supplier_ID"),
        project_id: node.id_of_type("Project_ID"),
        spend_category_id: node.id_of_type("Spend_Category_ID"),
        revenue_category_id: node.id_of_type("Revenue_Category_ID"),
        customer_contract_reference_id: node.id_of_type("Customer_Contract_Reference_ID"),
        cash_flow_code: node.id_of_type("Custom_Worktag_3_ID"),
        customer_id: node.id_of_type("Customer_ID"),
    }
}

/// Reconstruct one journal entry from a `Journal_Entry_Data` node
///
/// Absent nodes become `None` values, never errors; only malformed scalar
/// content fails the record. Book codes are joined against the pre-fetched
/// dictionary while parsing.
pub fn parse_journal(
    node: &XmlNode,
    book_codes: &HashMap<String, BookCodeInfo>,
) -> Result<JournalEntry> {
    let journal_entry_reference = JournalEntryReference {
        wid: node.reference_id("Journal_Entry_Reference", "WID"),
        accounting_journal_id: node.reference_id("Journal_Entry_Reference", "Accounting_Journal_ID"),
    };

    // P&L destination rides on the first worktag reference of the entry
    let custom_worktag_4_id = node
        .descendant("Worktags_Reference")
        .and_then(|w| w.id_of_type("Custom_Worktag_4_ID"));

    let journal_status_reference =
        node.descendant("Journal_Status_Reference").map(|status| JournalStatusReference {
            wid: status.id_of_type("WID"),
            journal_entry_status_id: status.id_of_type("Journal_Entry_Status_ID"),
        });

    let book_code = node
        .reference_id("Book_Code_Reference", "Book_Code_ID")
        .and_then(|id| book_codes.get(&id))
        .cloned();

    let company_reference = node.descendant("Company_Reference").map(|company| CompanyReference {
        wid: company.id_of_type("WID"),
        organization_reference_id: company.id_of_type("Organization_Reference_ID"),
        company_reference_id: company.id_of_type("Company_Reference_ID"),
    });

    let currency_reference = node.descendant("Currency_Reference").map(|currency| CurrencyReference {
        wid: currency.id_of_type("WID"),
        currency_id: currency.id_of_type("Currency_ID"),
        currency_numeric_code: currency.id_of_type("Currency_Numeric_Code"),
    });

    let ledger_reference = node.descendant("Ledger_Reference").map(|ledger| LedgerReference {
        wid: ledger.id_of_type("WID"),
        ledger_reference_id: ledger.id_of_type("Ledger_Reference_ID"),
    });

    let journal_source_reference =
        node.descendant("Journal_Source_Reference").map(|source| JournalSourceReference {
            journal_source_id: source.id_of_type("Journal_Source_ID"),
        });

    let ledger_period_reference =
        node.descendant("Ledger_Period_Reference").map(|period| LedgerPeriodReference {
            wid: period.id_of_type("WID"),
        });

    let mut journal_entry_lines = Vec::new();
    for line_node in node.descendants("Journal_Entry_Line_Data") {
        let line_company_reference =
            line_node.child("Line_Company_Reference").map(|company| LineCompanyReference {
                wid: company.id_of_type("WID"),
                organization_reference_id: company.id_of_type("Organization_Reference_ID"),
                company_reference_id: company.id_of_type("Company_Reference_ID"),
            });

        let ledger_account_reference =
            line_node.child("Ledger_Account_Reference").map(|account| LedgerAccountReference {
                wid: account.id_of_type("WID"),
                ledger_account_id: account.id_of_type("Ledger_Account_ID"),
            });

        // every repeated worktag node contributes dimensions to one merged
        // reference
        let mut worktags_reference = WorktagsReference::default();
        for worktag in line_node.descendants("Worktags_Reference") {
            worktags_reference.merge(parse_worktag(worktag));
        }

        journal_entry_lines.push(JournalEntryLine {
            line_company_reference,
            ledger_account_reference,
            // lines settle in the journal's transaction currency
            currency_reference: currency_reference.clone(),
            worktags_reference,
            debit_amount: child_f64(line_node, "Debit_Amount")?,
            credit_amount: child_f64(line_node, "Credit_Amount")?,
            currency_rate: child_f64(line_node, "Currency_Rate")?,
            ledger_debit_amount: child_f64(line_node, "Ledger_Debit_Amount")?,
            ledger_credit_amount: child_f64(line_node, "Ledger_Credit_Amount")?,
            exclude_from_spend_report: child_i64(line_node, "Exclude_from_Spend_Report")?,
            journal_line_number: child_i64(line_node, "Journal_Line_Number")?,
            memo: child_text(line_node, "Memo"),
        });
    }

    Ok(JournalEntry {
        journal_number: node.text_of("Journal_Number"),
        journal_sequence_number: node.text_of("Journal_Sequence_Number"),
        accounting_date: node.text_of("Accounting_Date"),
        record_quantity: desc_i64(node, "Record_Quantity")?,
        total_ledger_debits: desc_f64(node, "Total_Ledger_Debits")?,
        total_ledger_credits: desc_f64(node, "Total_Ledger_Credits")?,
        creation_date: node.text_of("Creation_Date"),
        last_updated_date: node.text_of("Last_Updated_Date"),
        description: node.text_of("Memo"),
        custom_worktag_4_id,
        book_code,
        journal_entry_reference,
        journal_status_reference,
        company_reference,
        currency_reference,
        ledger_reference,
        journal_source_reference,
        ledger_period_reference,
        journal_entry_lines,
    })
}

/// Record adapter for `Journal_Entry_Data` nodes
///
/// Parsing and mapping happen per record, so a journal that fails either
/// stage becomes one failure record while the rest of the page survives.
pub struct JournalAdapter {
    api_version: String,
    book_codes: HashMap<String, BookCodeInfo>,
    mapper: JournalMapper,
}

impl JournalAdapter {
    pub fn new(
        api_version: impl Into<String>,
        book_codes: HashMap<String, BookCodeInfo>,
        mapper: JournalMapper,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            book_codes,
            mapper,
        }
    }

    /// Wire an engine against the Financial_Management endpoint
    pub fn engine(
        base_uri: &str,
        tenant: &str,
        api_version: &str,
        transport: Transport,
        page_size: u32,
        book_codes: HashMap<String, BookCodeInfo>,
        mapper: JournalMapper,
    ) -> FetchEngine<Self> {
        let endpoint = service_url(base_uri, tenant, "Financial_Management", api_version);
        FetchEngine::new(
            Self::new(api_version, book_codes, mapper),
            transport,
            EngineConfig::new(endpoint, page_size),
        )
    }
}

#[async_trait]
impl RecordAdapter for JournalAdapter {
    type Record = MappedJournal;
    const KIND: &'static str = "journal";

    fn data_path(&self) -> &str {
        "Journal_Entry_Data"
    }

    fn page_request(&self, page: u32, count: u32, criteria: &FetchCriteria) -> String {
        let from = criteria.accounting_from_date.as_deref().unwrap_or_default();
        let to = criteria.accounting_to_date.as_deref().unwrap_or_default();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Journals_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Request_Criteria>
                <wd:Accounting_From_Date>{from}</wd:Accounting_From_Date>
                <wd:Accounting_To_Date>{to}</wd:Accounting_To_Date>
            </wd:Request_Criteria>
            <wd:Response_Filter>
                {as_of}<wd:Page>{page}</wd:Page>
                <wd:Count>{count}</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Journal_Entry_Line_Data>true</wd:Include_Journal_Entry_Line_Data>
            </wd:Response_Group>
        </wd:Get_Journals_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
            from = xml_escape(from),
            to = xml_escape(to),
            as_of = as_of_filters(criteria),
        )
    }

    fn single_request(&self, id: &str, _criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Journals_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Request_References>
                <wd:Journal_Entry_Reference>
                    <wd:ID wd:type="Accounting_Journal_ID">{id}</wd:ID>
                </wd:Journal_Entry_Reference>
            </wd:Request_References>
            <wd:Response_Filter>
                <wd:Page>1</wd:Page>
                <wd:Count>999</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Journal_Entry_Line_Data>true</wd:Include_Journal_Entry_Line_Data>
            </wd:Response_Group>
        </wd:Get_Journals_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
            id = xml_escape(id),
        )
    }

    fn id_of(&self, node: &XmlNode) -> Option<String> {
        node.reference_id("Journal_Entry_Reference", "Accounting_Journal_ID")
    }

    async fn parse(&mut self, node: &XmlNode) -> Result<MappedJournal> {
        let journal = parse_journal(node, &self.book_codes)?;
        self.mapper.map(&journal).await
    }
}
