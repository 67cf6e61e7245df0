//! Spend categories (expense types)
//!
//! Served by the `Get_Resource_Categories` operation of the
//! Resource_Management service. Looked up lazily per spend-category id
//! while mapping journal lines, cached for the rest of the batch.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::core::fetch::{EngineConfig, FetchCriteria, FetchEngine, RecordAdapter};
use crate::domain::reference::SpendCategory;
use crate::domain::Result;
use async_trait::async_trait;

use super::{service_url, xml_escape};

/// Record adapter for `Resource_Category_Data` nodes
pub struct SpendCategoryAdapter {
    api_version: String,
}

impl SpendCategoryAdapter {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
        }
    }

    /// Wire an engine against the Resource_Management endpoint
    pub fn engine(
        base_uri: &str,
        tenant: &str,
        api_version: &str,
        transport: Transport,
        page_size: u32,
    ) -> FetchEngine<Self> {
        let endpoint = service_url(base_uri, tenant, "Resource_Management", api_version);
        FetchEngine::new(
            Self::new(api_version),
            transport,
            EngineConfig::new(endpoint, page_size),
        )
    }
}

#[async_trait]
impl RecordAdapter for SpendCategoryAdapter {
    type Record = SpendCategory;
    const KIND: &'static str = "spend category";

    fn data_path(&self) -> &str {
        "Resource_Category_Data"
    }

    fn page_request(&self, page: u32, count: u32, _criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Resource_Categories_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Response_Filter>
                <wd:Page>{page}</wd:Page>
                <wd:Count>{count}</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
            </wd:Response_Group>
        </wd:Get_Resource_Categories_Request>
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
        <wd:Get_Resource_Categories_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Request_References>
                <wd:Resource_Category_Reference>
                    <wd:ID wd:type="Spend_Category_ID">{id}</wd:ID>
                </wd:Resource_Category_Reference>
            </wd:Request_References>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
            </wd:Response_Group>
        </wd:Get_Resource_Categories_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
            id = xml_escape(id),
        )
    }

    fn id_of(&self, node: &XmlNode) -> Option<String> {
        node.text_of("Resource_Category_ID")
    }

    async fn parse(&mut self, node: &XmlNode) -> Result<SpendCategory> {
        Ok(SpendCategory {
            code: node.text_of("Resource_Category_ID"),
            name: node.text_of("Resource_Category_Name"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_resource_category() {
        let xml = r#"<wd:Resource_Category_Data xmlns:wd="urn:com.workday/bsvc">
            <wd:Resource_Category_ID>SC_TRAVEL</wd:Resource_Category_ID>
            <wd:Resource_Category_Name>Travel and Lodging</wd:Resource_Category_Name>
        </wd:Resource_Category_Data>"#;
        let node = XmlNode::parse(xml).unwrap();

        let mut adapter = SpendCategoryAdapter::new("v43.1");
        let category = adapter.parse(&node).await.unwrap();

        assert_eq!(category.code.as_deref(), Some("SC_TRAVEL"));
        assert_eq!(category.name.as_deref(), Some("Travel and Lodging"));
        assert_eq!(adapter.id_of(&node).as_deref(), Some("SC_TRAVEL"));
    }

    #[test]
    fn test_single_request_carries_id_and_type() {
        let adapter = SpendCategoryAdapter::new("v43.1");
        let payload = adapter.single_request("SC_TRAVEL", &FetchCriteria::none());

        assert!(payload.contains(r#"wd:type="Spend_Category_ID""#));
        assert!(payload.contains(">SC_TRAVEL<"));
        assert!(payload.contains(r#"wd:version="v43.1""#));
    }

    #[test]
    fn test_page_request_carries_pagination() {
        let adapter = SpendCategoryAdapter::new("v43.1");
        let payload = adapter.page_request(3, 999, &FetchCriteria::none());
        assert!(payload.contains("<wd:Page>3</wd:Page>"));
        assert!(payload.contains("<wd:Count>999</wd:Count>"));
    }
}
