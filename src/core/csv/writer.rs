//! CSV rendering of mapped journals
//!
//! Flattens a batch of [`MappedJournal`]s into one CSV document: a single
//! header line and one row per mapped entry, journal-level fields repeated
//! on every row of their journal.

use crate::domain::mapped::{MappedEntryJournal, MappedJournal};
use crate::domain::Result;

const HEADER: [&str; 33] = [
    "journal_id",
    "accounting_period",
    "journal_source",
    "document_number",
    "document_description",
    "account_code",
    "book_code",
    "pl_destination",
    "ledger_account_id",
    "ledger_account_name",
    "ledger_account_type",
    "subsidiary_id",
    "subsidiary_name",
    "cost_center_code",
    "cost_center_name",
    "expense_type_code",
    "expense_type_name",
    "vendor_code",
    "vendor_name",
    "gtm_org_id",
    "gtm_org_name",
    "deal_id",
    "deal_name",
    "revenue_category",
    "project_code",
    "cash_flow_code",
    "customer_id",
    "memo",
    "debit",
    "credit",
    "ledger_debit",
    "ledger_credit",
    "currency",
];

/// Render mapped journals into one CSV document
pub fn mapped_journals_to_csv(journals: &[MappedJournal]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for journal in journals {
        for entry in &journal.mapped_entries {
            writer.write_record(render_row(journal, entry))?;
        }
    }

    writer.flush().map_err(|e| crate::domain::AbacusError::Io(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::domain::AbacusError::Serialization(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| crate::domain::AbacusError::Serialization(e.to_string()))
}

fn render_row(journal: &MappedJournal, entry: &MappedEntryJournal) -> Vec<String> {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    let num = |value: &Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    let ledger_account = entry.ledger_account.as_ref();
    let subsidiary = entry.subsidiary_info.as_ref();
    let cost_center = entry.cost_center_info.as_ref();
    let expense_type = entry.expense_type.as_ref();
    let vendor = entry.vendor_info.as_ref();
    let gtm_org = entry.revenue_info.gtm_org.as_ref();
    let deal = entry.revenue_info.deal.as_ref();

    vec![
        opt(&journal.journal_id),
        opt(&journal.accounting_period_name),
        opt(&journal.journal_source),
        opt(&journal.document_info.document_number),
        opt(&journal.document_info.description),
        opt(&journal.account_info.code),
        journal
            .book_code_info
            .as_ref()
            .and_then(|b| b.book_code_id.clone())
            .unwrap_or_default(),
        opt(&journal.pl_info_destination),
        ledger_account
            .and_then(|a| a.ledger_account_id.clone())
            .unwrap_or_default(),
        ledger_account
            .and_then(|a| a.ledger_account_name.clone())
            .unwrap_or_default(),
        ledger_account.and_then(|a| a.types.clone()).unwrap_or_default(),
        subsidiary.and_then(|s| s.internal_id.clone()).unwrap_or_default(),
        subsidiary.and_then(|s| s.name.clone()).unwrap_or_default(),
        cost_center.and_then(|c| c.code.clone()).unwrap_or_default(),
        cost_center.and_then(|c| c.name.clone()).unwrap_or_default(),
        expense_type.and_then(|e| e.code.clone()).unwrap_or_default(),
        expense_type.and_then(|e| e.name.clone()).unwrap_or_default(),
        vendor.and_then(|v| v.vendor_code.clone()).unwrap_or_default(),
        vendor.and_then(|v| v.company_name.clone()).unwrap_or_default(),
        gtm_org.and_then(|g| g.dimension_id.clone()).unwrap_or_default(),
        gtm_org.and_then(|g| g.name.clone()).unwrap_or_default(),
        deal.and_then(|d| d.customer_contract_id.clone()).unwrap_or_default(),
        deal.and_then(|d| d.contract_name.clone()).unwrap_or_default(),
        opt(&entry.revenue_info.revenue_name),
        opt(&entry.project_code),
        opt(&entry.cash_flow_code),
        opt(&entry.customer_id),
        opt(&entry.memo),
        num(&entry.amount_info.debit),
        num(&entry.amount_info.credit),
        num(&entry.amount_info.ledger_debit),
        num(&entry.amount_info.ledger_credit),
        opt(&entry.amount_info.currency_symbol),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapped::{AccountInfo, AmountInfo, DocumentInfo};
    use crate::domain::reference::LedgerAccount;

    fn sample() -> MappedJournal {
        MappedJournal {
            journal_id: Some("JRNL-1".to_string()),
            accounting_period_name: Some("2024-02-01".to_string()),
            journal_source: Some("Spreadsheet_Upload".to_string()),
            account_info: AccountInfo {
                code: Some("ACTUALS".to_string()),
                ..AccountInfo::default()
            },
            document_info: DocumentInfo {
                document_number: Some("JRNL 2024 02".to_string()),
                description: None,
            },
            mapped_entries: vec![
                MappedEntryJournal {
                    ledger_account: Some(LedgerAccount {
                        ledger_account_id: Some("6000".to_string()),
                        ledger_account_name: Some("Operating Expenses".to_string()),
                        ..LedgerAccount::default()
                    }),
                    amount_info: AmountInfo {
                        debit: Some(1750.0),
                        credit: Some(0.0),
                        currency_symbol: Some("EUR".to_string()),
                        ..AmountInfo::default()
                    },
                    memo: Some("Flights, February".to_string()),
                    ..MappedEntryJournal::default()
                },
                MappedEntryJournal {
                    amount_info: AmountInfo {
                        credit: Some(1750.0),
                        ..AmountInfo::default()
                    },
                    ..MappedEntryJournal::default()
                },
            ],
            ..MappedJournal::default()
        }
    }

    #[test]
    fn test_one_row_per_mapped_entry_plus_header() {
        let content = mapped_journals_to_csv(&[sample()]).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("journal_id,accounting_period"));
    }

    #[test]
    fn test_rows_carry_journal_and_entry_fields() {
        let content = mapped_journals_to_csv(&[sample()]).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();

        assert!(lines[1].starts_with("JRNL-1,2024-02-01,Spreadsheet_Upload"));
        assert!(lines[1].contains("Operating Expenses"));
        assert!(lines[1].contains("1750"));
        // comma inside the memo stays quoted
        assert!(lines[1].contains("\"Flights, February\""));
        // second entry repeats the journal-level columns
        assert!(lines[2].starts_with("JRNL-1,2024-02-01"));
    }

    #[test]
    fn test_empty_batch_renders_header_only() {
        let content = mapped_journals_to_csv(&[]).unwrap();
        assert_eq!(content.trim().lines().count(), 1);
    }
}
