//! Per-entity Workday services
//!
//! One module per entity kind: the request envelopes it speaks, the parser
//! for its data nodes, and a constructor wiring the adapter into a
//! [`crate::core::fetch::FetchEngine`] or
//! [`reports::ReportService`].

pub mod customer_contracts;
pub mod journals;
pub mod reports;
pub mod spend_categories;
pub mod suppliers;

use crate::core::fetch::FetchCriteria;
use quick_xml::escape::escape;

/// Web-services endpoint URL for one tenant service
///
/// e.g. `https://host/ccx/service/acme_corp/Financial_Management/v43.1`
pub(crate) fn service_url(base_uri: &str, tenant: &str, service: &str, version: &str) -> String {
    format!("{base_uri}/ccx/service/{tenant}/{service}/{version}")
}

/// RAAS custom-report endpoint URL
///
/// e.g. `https://host/ccx/service/customreport2/acme_corp/ISU%20Workato/<report>`
pub(crate) fn report_url(base_uri: &str, tenant: &str, report: &str) -> String {
    format!("{base_uri}/ccx/service/customreport2/{tenant}/ISU%20Workato/{report}")
}

/// Escape a value for interpolation into an XML payload
pub(crate) fn xml_escape(value: &str) -> String {
    escape(value).into_owned()
}

/// Render the optional as-of snapshot filters of a `Response_Filter` block
///
/// Absent criteria contribute nothing to the payload.
pub(crate) fn as_of_filters(criteria: &FetchCriteria) -> String {
    let mut filters = String::new();
    if let Some(date) = &criteria.as_of_effective_date {
        filters.push_str(&format!(
            "<wd:As_Of_Effective_Date>{}</wd:As_Of_Effective_Date>",
            xml_escape(date)
        ));
    }
    if let Some(datetime) = &criteria.as_of_entry_datetime {
        filters.push_str(&format!(
            "<wd:As_Of_Entry_DateTime>{}</wd:As_Of_Entry_DateTime>",
            xml_escape(datetime)
        ));
    }
    filters
}
