//! RAAS master-data reports
//!
//! Reference dictionaries come from report-style export endpoints that
//! answer an entire dataset in one GET. [`ReportService`] fetches one
//! report and folds its `Report_Entry` nodes into a map keyed by the
//! record's business key; the per-report [`ReportAdapter`]s know the field
//! layout. Dictionaries are built once per batch and treated as read-only
//! snapshots afterwards.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::domain::reference::{
    BookCodeInfo, CostCenterInfo, GeoSales, LedgerAccount, Manager, SubsidiaryInfo,
};
use crate::domain::Result;
use std::collections::HashMap;

use super::report_url;

/// Pluggable per-report parsing
pub trait ReportAdapter: Send {
    /// Parsed record type
    type Record: Clone + Send;

    /// Report kind label used in logs
    const KIND: &'static str;

    /// Parse one report entry into its business key and record
    ///
    /// Returning `None` skips the entry (no key, or filtered out).
    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, Self::Record)>;
}

/// Whole-dataset report fetcher
pub struct ReportService<A: ReportAdapter> {
    adapter: A,
    transport: Transport,
    url: String,
}

impl<A: ReportAdapter> ReportService<A> {
    pub fn new(adapter: A, transport: Transport, url: String) -> Self {
        Self {
            adapter,
            transport,
            url,
        }
    }

    /// Fetch the report and fold it into a dictionary
    pub async fn get_entity_map(&self) -> Result<HashMap<String, A::Record>> {
        let body = self.transport.get_xml(&self.url).await?;
        let root = XmlNode::parse(&body)?;

        let entries = root.descendants("Report_Entry");
        tracing::info!(kind = A::KIND, entries = entries.len(), "Fetched report");

        let mut map = HashMap::new();
        for entry in entries {
            if let Some((key, record)) = self.adapter.parse_entry(entry) {
                map.insert(key, record);
            }
        }
        Ok(map)
    }
}

/// Companies aka subsidiaries
pub struct CompanyReport;

impl CompanyReport {
    pub fn service(base_uri: &str, tenant: &str, transport: Transport) -> ReportService<Self> {
        let url = report_url(base_uri, tenant, "INT-UPD-001_MasterData_Companies");
        ReportService::new(Self, transport, url)
    }
}

impl ReportAdapter for CompanyReport {
    type Record = SubsidiaryInfo;
    const KIND: &'static str = "company";

    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, SubsidiaryInfo)> {
        let reference_id = entry.text_of("referenceID")?;
        let subsidiary = SubsidiaryInfo {
            internal_id: Some(reference_id.clone()),
            name: entry.descriptor_of("Company"),
        };
        Some((reference_id, subsidiary))
    }
}

/// Book codes
pub struct BookCodeReport;

impl BookCodeReport {
    pub fn service(base_uri: &str, tenant: &str, transport: Transport) -> ReportService<Self> {
        let url = report_url(base_uri, tenant, "INT-AUTO-001_MasterData_BookCodes");
        ReportService::new(Self, transport, url)
    }
}

impl ReportAdapter for BookCodeReport {
    type Record = BookCodeInfo;
    const KIND: &'static str = "book code";

    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, BookCodeInfo)> {
        let book_code_id = entry.text_of("Book_Code_ID")?;
        let book_code = BookCodeInfo {
            book_code_id: Some(book_code_id.clone()),
            name: entry.descriptor_of("Book_Code_Name"),
        };
        Some((book_code_id, book_code))
    }
}

/// Cost centers, keyed by cost-center code
pub struct CostCenterReport;

impl CostCenterReport {
    pub fn service(base_uri: &str, tenant: &str, transport: Transport) -> ReportService<Self> {
        let url = report_url(base_uri, tenant, "INT-UPL-002_MasterData_CostCenters");
        ReportService::new(Self, transport, url)
    }
}

impl ReportAdapter for CostCenterReport {
    type Record = CostCenterInfo;
    const KIND: &'static str = "cost center";

    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, CostCenterInfo)> {
        let code = entry.text_of("Cost_Center_Code")?;

        // the report flags inactivity, the record carries activity
        let is_active = entry.bool_of("Inactive").map(|inactive| !inactive);

        let manager = Manager {
            manager_employee_id: entry.reference_id("Cost_Center_Manager", "Employee_ID"),
            manager_name: entry.descriptor_of("Cost_Center_Manager"),
        };

        // descriptor reads "CC123 - Name", keep the part after the code
        let name = entry
            .descriptor_of("Cost_Center")
            .and_then(|descriptor| {
                descriptor
                    .split_once('-')
                    .map(|(_, name)| name.trim().to_string())
            });

        let cost_center = CostCenterInfo {
            reference_id: entry.text_of("referenceID"),
            name,
            code: Some(code.clone()),
            is_active,
            manager: Some(manager),
        };
        Some((code, cost_center))
    }
}

/// Ledger accounts
pub struct LedgerAccountReport;

impl LedgerAccountReport {
    pub fn service(base_uri: &str, tenant: &str, transport: Transport) -> ReportService<Self> {
        let url = report_url(base_uri, tenant, "INT-UPL-001_MasterData_LedgerAccounts");
        ReportService::new(Self, transport, url)
    }
}

impl ReportAdapter for LedgerAccountReport {
    type Record = LedgerAccount;
    const KIND: &'static str = "ledger account";

    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, LedgerAccount)> {
        let ledger_account_id = entry.text_of("Ledger_Account_ID")?;

        let account_sets = entry
            .children("Account_Sets")
            .filter_map(|set| set.attr("Descriptor").map(str::to_string))
            .collect();

        let account = LedgerAccount {
            ledger_account_id: Some(ledger_account_id.clone()),
            ledger_account_name: entry.descriptor_of("Ledger_Account_Name"),
            types: entry.descriptor_of("Types"),
            account_sets,
        };
        Some((ledger_account_id, account))
    }
}

/// GTM organizations (geo sales); inactive organizations are skipped
pub struct GeoSalesReport;

impl GeoSalesReport {
    pub fn service(base_uri: &str, tenant: &str, transport: Transport) -> ReportService<Self> {
        let url = report_url(base_uri, tenant, "INT-AUTO-014_MasterData_GeoSales");
        ReportService::new(Self, transport, url)
    }
}

impl ReportAdapter for GeoSalesReport {
    type Record = GeoSales;
    const KIND: &'static str = "GTM organization";

    fn parse_entry(&self, entry: &XmlNode) -> Option<(String, GeoSales)> {
        let dimension_id = entry.text_of("Dimension_Reference_ID")?;
        let organization_active = entry.bool_of("RPT_TF_Organization_Active").unwrap_or(false);

        if !organization_active {
            return None;
        }

        let geosales = GeoSales {
            dimension_id: Some(dimension_id.clone()),
            name: entry.text_of("name"),
            organization_active: Some(organization_active),
            dimension_name: entry.descriptor_of("Dimension"),
        };
        Some((dimension_id, geosales))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;

    fn transport() -> Transport {
        Transport::new(
            "tok",
            10,
            RetryConfig {
                max_attempts: 1,
                delay_ms: 1,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_company_entry() {
        let xml = r#"<wd:Report_Entry xmlns:wd="urn:com.workday.report/x">
            <wd:referenceID>LE-111</wd:referenceID>
            <wd:Company wd:Descriptor="Acme France SAS"/>
        </wd:Report_Entry>"#;
        let entry = XmlNode::parse(xml).unwrap();

        let (key, subsidiary) = CompanyReport.parse_entry(&entry).unwrap();
        assert_eq!(key, "LE-111");
        assert_eq!(subsidiary.name.as_deref(), Some("Acme France SAS"));
    }

    #[test]
    fn test_company_entry_without_key_is_skipped() {
        let entry = XmlNode::parse("<Report_Entry><Company/></Report_Entry>").unwrap();
        assert!(CompanyReport.parse_entry(&entry).is_none());
    }

    #[test]
    fn test_cost_center_entry() {
        let xml = r#"<wd:Report_Entry xmlns:wd="urn:com.workday.report/x">
            <wd:Inactive>0</wd:Inactive>
            <wd:referenceID>CC_REF_1</wd:referenceID>
            <wd:Cost_Center_Code>CC100</wd:Cost_Center_Code>
            <wd:Cost_Center wd:Descriptor="CC100 - Engineering Platform"/>
            <wd:Cost_Center_Manager wd:Descriptor="Jordan Smith">
                <wd:ID wd:type="Employee_ID">E-42</wd:ID>
            </wd:Cost_Center_Manager>
        </wd:Report_Entry>"#;
        let entry = XmlNode::parse(xml).unwrap();

        let (key, cc) = CostCenterReport.parse_entry(&entry).unwrap();
        assert_eq!(key, "CC100");
        assert_eq!(cc.is_active, Some(true));
        assert_eq!(cc.name.as_deref(), Some("Engineering Platform"));
        let manager = cc.manager.unwrap();
        assert_eq!(manager.manager_employee_id.as_deref(), Some("E-42"));
        assert_eq!(manager.manager_name.as_deref(), Some("Jordan Smith"));
    }

    #[test]
    fn test_ledger_account_entry_collects_account_sets() {
        let xml = r#"<wd:Report_Entry xmlns:wd="urn:com.workday.report/x">
            <wd:Ledger_Account_ID>6000</wd:Ledger_Account_ID>
            <wd:Ledger_Account_Name wd:Descriptor="Operating Expenses"/>
            <wd:Types wd:Descriptor="Expense"/>
            <wd:Account_Sets wd:Descriptor="Corporate"/>
            <wd:Account_Sets wd:Descriptor="Statutory"/>
        </wd:Report_Entry>"#;
        let entry = XmlNode::parse(xml).unwrap();

        let (key, account) = LedgerAccountReport.parse_entry(&entry).unwrap();
        assert_eq!(key, "6000");
        assert_eq!(account.ledger_account_name.as_deref(), Some("Operating Expenses"));
        assert_eq!(account.account_sets, vec!["Corporate", "Statutory"]);
    }

    #[test]
    fn test_geo_sales_skips_inactive() {
        let xml = r#"<wd:Report_Entry xmlns:wd="urn:com.workday.report/x">
            <wd:Dimension_Reference_ID>GTM-EMEA</wd:Dimension_Reference_ID>
            <wd:name>EMEA</wd:name>
            <wd:RPT_TF_Organization_Active>0</wd:RPT_TF_Organization_Active>
        </wd:Report_Entry>"#;
        let entry = XmlNode::parse(xml).unwrap();
        assert!(GeoSalesReport.parse_entry(&entry).is_none());
    }

    #[tokio::test]
    async fn test_report_service_folds_entries_into_map() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"<wd:Report_Data xmlns:wd="urn:com.workday.report/x">
            <wd:Report_Entry>
                <wd:Book_Code_ID>COMMON</wd:Book_Code_ID>
                <wd:Book_Code_Name wd:Descriptor="Common book"/>
            </wd:Report_Entry>
            <wd:Report_Entry>
                <wd:Book_Code_ID>LOCAL</wd:Book_Code_ID>
                <wd:Book_Code_Name wd:Descriptor="Local book"/>
            </wd:Report_Entry>
        </wd:Report_Data>"#;
        server
            .mock("GET", "/report")
            .with_body(body)
            .create_async()
            .await;

        let service = ReportService::new(
            BookCodeReport,
            transport(),
            format!("{}/report", server.url()),
        );
        let map = service.get_entity_map().await.unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["COMMON"].name.as_deref(), Some("Common book"));
        assert_eq!(map["LOCAL"].name.as_deref(), Some("Local book"));
    }
}
