//! Customer contracts (deals)
//!
//! Served by the `Get_Customer_Contracts` operation of the
//! Revenue_Management service. Looked up lazily per customer-contract
//! reference while mapping journal lines, cached for the rest of the batch.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::core::fetch::{EngineConfig, FetchCriteria, FetchEngine, RecordAdapter};
use crate::domain::reference::DealInfo;
use crate::domain::Result;
use async_trait::async_trait;

use super::{service_url, xml_escape};

/// Record adapter for `Customer_Contract_Data` nodes
pub struct CustomerContractAdapter {
    api_version: String,
}

impl CustomerContractAdapter {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
        }
    }

    /// Wire an engine against the Revenue_Management endpoint
    pub fn engine(
        base_uri: &str,
        tenant: &str,
        api_version: &str,
        transport: Transport,
        page_size: u32,
    ) -> FetchEngine<Self> {
        let endpoint = service_url(base_uri, tenant, "Revenue_Management", api_version);
        FetchEngine::new(
            Self::new(api_version),
            transport,
            EngineConfig::new(endpoint, page_size),
        )
    }
}

#[async_trait]
impl RecordAdapter for CustomerContractAdapter {
    type Record = DealInfo;
    const KIND: &'static str = "customer contract";

    fn data_path(&self) -> &str {
        "Customer_Contract_Data"
    }

    fn page_request(&self, page: u32, count: u32, _criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Customer_Contracts_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Response_Filter>
                <wd:Page>{page}</wd:Page>
                <wd:Count>{count}</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
                <wd:Include_Customer_Contract_Data>true</wd:Include_Customer_Contract_Data>
            </wd:Response_Group>
        </wd:Get_Customer_Contracts_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
        )
    }

    fn single_request(&self, id: &str, _criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Customer_Contracts_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Request_References>
                <wd:Customer_Contract_Reference>
                    <wd:ID wd:type="Customer_Contract_Reference_ID">{id}</wd:ID>
                </wd:Customer_Contract_Reference>
            </wd:Request_References>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
                <wd:Include_Customer_Contract_Data>true</wd:Include_Customer_Contract_Data>
            </wd:Response_Group>
        </wd:Get_Customer_Contracts_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
            id = xml_escape(id),
        )
    }

    fn id_of(&self, node: &XmlNode) -> Option<String> {
        node.text_of("Customer_Contract_ID")
    }

    async fn parse(&mut self, node: &XmlNode) -> Result<DealInfo> {
        Ok(DealInfo {
            customer_contract_id: node.text_of("Customer_Contract_ID"),
            contract_name: node.text_of("Contract_Name"),
            po_number: node.text_of("PO_Number"),
            on_hold: node.bool_of("On_Hold"),
            contract_type: node
                .reference_id("Customer_Contract_Type_Reference", "Contract_Type_ID"),
        })
    }
}
