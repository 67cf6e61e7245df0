//! Record adapter seam
//!
//! The fetch engine is generic over the entity kind it retrieves. Each kind
//! plugs in a [`RecordAdapter`]: how to build the request payloads, where
//! the entity data nodes live in the response, how to derive a record's
//! business id, and how to parse one node into a typed record.

use crate::adapters::workday::xml::XmlNode;
use crate::domain::Result;
use async_trait::async_trait;

/// Optional request filters forwarded into generated payloads
///
/// Each field is either absent (no filter emitted) or forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchCriteria {
    /// Lower accounting-date bound (journals only)
    pub accounting_from_date: Option<String>,
    /// Upper accounting-date bound (journals only)
    pub accounting_to_date: Option<String>,
    /// Effective-date snapshot filter
    pub as_of_effective_date: Option<String>,
    /// Entry-datetime snapshot filter
    pub as_of_entry_datetime: Option<String>,
}

impl FetchCriteria {
    /// Criteria with no filters set
    pub fn none() -> Self {
        Self::default()
    }

    /// Criteria bounded to an accounting-date range
    pub fn accounting_dates(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            accounting_from_date: Some(from.into()),
            accounting_to_date: Some(to.into()),
            ..Self::default()
        }
    }
}

/// Per-engine endpoint configuration
///
/// Built once per engine instance; the engine has no process-wide state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Full service URL the engine posts to
    pub endpoint: String,
    /// Records requested per page
    pub page_size: u32,
}

impl EngineConfig {
    pub fn new(endpoint: impl Into<String>, page_size: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size,
        }
    }
}

/// Pluggable per-entity behavior of the fetch engine
#[async_trait]
pub trait RecordAdapter: Send {
    /// Parsed record type
    type Record: Clone + Send;

    /// Entity kind label used in logs and failure reasons
    const KIND: &'static str;

    /// Local name of the entity data node in responses,
    /// e.g. `Journal_Entry_Data`
    fn data_path(&self) -> &str;

    /// Request payload for one page of the full collection
    fn page_request(&self, page: u32, count: u32, criteria: &FetchCriteria) -> String;

    /// Request payload for a single-record lookup by business id
    fn single_request(&self, id: &str, criteria: &FetchCriteria) -> String;

    /// Business id of one entity data node, when extractable
    fn id_of(&self, node: &XmlNode) -> Option<String>;

    /// Parse one entity data node into a record
    ///
    /// May consult other engines (the journal adapter resolves lazy
    /// lookups while parsing), hence `&mut self` and async.
    async fn parse(&mut self, node: &XmlNode) -> Result<Self::Record>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_none_has_no_filters() {
        let criteria = FetchCriteria::none();
        assert!(criteria.accounting_from_date.is_none());
        assert!(criteria.as_of_entry_datetime.is_none());
    }

    #[test]
    fn test_criteria_accounting_dates() {
        let criteria = FetchCriteria::accounting_dates("2024-10-01", "2024-10-31");
        assert_eq!(criteria.accounting_from_date.as_deref(), Some("2024-10-01"));
        assert_eq!(criteria.accounting_to_date.as_deref(), Some("2024-10-31"));
        assert!(criteria.as_of_effective_date.is_none());
    }
}
