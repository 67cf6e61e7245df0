//! Suppliers (vendors)
//!
//! Served by the `Get_Suppliers` operation of the Resource_Management
//! service. Looked up lazily per supplier worktag while mapping journal
//! lines, cached for the rest of the batch. Single-record lookups honor
//! the as-of snapshot filters when the caller sets them.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::core::fetch::{EngineConfig, FetchCriteria, FetchEngine, RecordAdapter};
use crate::domain::reference::VendorInfo;
use crate::domain::Result;
use async_trait::async_trait;

use super::{as_of_filters, service_url, xml_escape};

/// Record adapter for `Supplier_Data` nodes
pub struct SupplierAdapter {
    api_version: String,
}

impl SupplierAdapter {
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
impl RecordAdapter for SupplierAdapter {
    type Record = VendorInfo;
    const KIND: &'static str = "supplier";

    fn data_path(&self) -> &str {
        "Supplier_Data"
    }

    fn page_request(&self, page: u32, count: u32, _criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Suppliers_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Response_Filter>
                <wd:Page>{page}</wd:Page>
                <wd:Count>{count}</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
            </wd:Response_Group>
        </wd:Get_Suppliers_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
        )
    }

    fn single_request(&self, id: &str, criteria: &FetchCriteria) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <wd:Get_Suppliers_Request xmlns:wd="urn:com.workday/bsvc" wd:version="{version}">
            <wd:Request_References>
                <wd:Supplier_Reference>
                    <wd:ID wd:type="Supplier_ID">{id}</wd:ID>
                </wd:Supplier_Reference>
            </wd:Request_References>
            <wd:Response_Filter>
                {as_of}<wd:Page>1</wd:Page>
                <wd:Count>1</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Reference>true</wd:Include_Reference>
            </wd:Response_Group>
        </wd:Get_Suppliers_Request>
    </env:Body>
</env:Envelope>"#,
            version = self.api_version,
            id = xml_escape(id),
            as_of = as_of_filters(criteria),
        )
    }

    fn id_of(&self, node: &XmlNode) -> Option<String> {
        node.text_of("Supplier_ID")
    }

    async fn parse(&mut self, node: &XmlNode) -> Result<VendorInfo> {
        Ok(VendorInfo {
            vendor_code: node.text_of("Supplier_ID"),
            vendor_ref_id: node.text_of("Supplier_Reference_ID"),
            company_name: node.text_of("Supplier_Name"),

            worktag_only: node.bool_of("Worktag_Only"),
            submit: node.bool_of("Submit"),
            disable_change_order: node.bool_of("Disable_Change_Order"),
            acknowledgement_expected: node.bool_of("Acknowledgement_Expected"),

            approval_status: node
                .reference_id("Approval_Status_Reference", "Document_Status_ID"),
            supplier_category: node
                .reference_id("Supplier_Category_Reference", "Supplier_Category_ID"),
            supplier_group_category: node
                .reference_id("Supplier_Group_Reference", "Supplier_Group_ID"),
            payment_terms_reference: node
                .reference_id("Payment_Terms_Reference", "Payment_Terms_ID"),
            default_payment_type_reference: node
                .reference_id("Default_Payment_Type_Reference", "Payment_Type_ID"),

            irs_1099_supplier: node.bool_of("IRS_1099_Supplier"),
            invoice_any_supplier: node.int_of("Invoice_Any_Supplier"),
            supplier_minimum_order_amount: node.int_of("Supplier_Minimum_Order_Amount"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_supplier() {
        let xml = r#"<wd:Supplier_Data xmlns:wd="urn:com.workday/bsvc">
            <wd:Supplier_ID>VEND-9</wd:Supplier_ID>
            <wd:Supplier_Reference_ID>S-000009</wd:Supplier_Reference_ID>
            <wd:Supplier_Name>Globex Services Ltd</wd:Supplier_Name>
            <wd:Worktag_Only>0</wd:Worktag_Only>
            <wd:Submit>1</wd:Submit>
            <wd:Approval_Status_Reference>
                <wd:ID wd:type="Document_Status_ID">Approved</wd:ID>
            </wd:Approval_Status_Reference>
            <wd:Payment_Terms_Reference>
                <wd:ID wd:type="Payment_Terms_ID">NET_30</wd:ID>
            </wd:Payment_Terms_Reference>
        </wd:Supplier_Data>"#;
        let node = XmlNode::parse(xml).unwrap();

        let mut adapter = SupplierAdapter::new("v43.1");
        let vendor = adapter.parse(&node).await.unwrap();

        assert_eq!(vendor.vendor_code.as_deref(), Some("VEND-9"));
        assert_eq!(vendor.company_name.as_deref(), Some("Globex Services Ltd"));
        assert_eq!(vendor.worktag_only, Some(false));
        assert_eq!(vendor.submit, Some(true));
        assert_eq!(vendor.approval_status.as_deref(), Some("Approved"));
        assert_eq!(vendor.payment_terms_reference.as_deref(), Some("NET_30"));
        assert!(vendor.irs_1099_supplier.is_none());
    }

    #[test]
    fn test_single_request_includes_as_of_filters() {
        let adapter = SupplierAdapter::new("v43.1");
        let criteria = FetchCriteria {
            as_of_entry_datetime: Some("2024-10-01T00:00:00".to_string()),
            ..FetchCriteria::none()
        };
        let payload = adapter.single_request("VEND-9", &criteria);

        assert!(payload.contains(r#"wd:type="Supplier_ID""#));
        assert!(payload.contains("<wd:As_Of_Entry_DateTime>2024-10-01T00:00:00</wd:As_Of_Entry_DateTime>"));
        assert!(payload.contains("<wd:Count>1</wd:Count>"));
    }
}
