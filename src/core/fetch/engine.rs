//! Generic paginated fetch engine
//!
//! [`FetchEngine`] drives page-by-page retrieval of one homogeneous record
//! collection through an injected [`RecordAdapter`], with an identity-keyed
//! cache for single-record lookups and per-record failure isolation: a node
//! that fails to parse is recorded and skipped, never aborting the page or
//! the batch.
//!
//! One engine instance serves one logical batch. Its cache, accumulator and
//! failure list are reset at the start of every `get_all_entities` call and
//! must not be shared across concurrently running batches. All transport
//! calls are awaited strictly in sequence; page N+1 is only requested after
//! page N has been parsed, because the iteration bound comes from the
//! pagination envelope of page 1.

use crate::adapters::workday::transport::Transport;
use crate::adapters::workday::xml::XmlNode;
use crate::domain::{AbacusError, FailedJournal, Result, WorkdayError};
use std::collections::HashMap;

use super::adapter::{EngineConfig, FetchCriteria, RecordAdapter};
use super::pagination::ResponseResults;

/// Paginated fetch-and-cache driver for one entity kind
pub struct FetchEngine<A: RecordAdapter> {
    adapter: A,
    transport: Transport,
    config: EngineConfig,

    cache: HashMap<String, A::Record>,
    accumulated: Vec<A::Record>,
    failed: Vec<FailedJournal>,

    is_complete: bool,
    next_page: u32,
    total_pages: u32,
    total_records: u64,
}

impl<A: RecordAdapter> FetchEngine<A> {
    /// Create an engine for one batch
    pub fn new(adapter: A, transport: Transport, config: EngineConfig) -> Self {
        Self {
            adapter,
            transport,
            config,
            cache: HashMap::new(),
            accumulated: Vec::new(),
            failed: Vec::new(),
            is_complete: false,
            next_page: 1,
            total_pages: 0,
            total_records: 0,
        }
    }

    /// Whether the last full fetch accumulated every reported record
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Total record count reported by the last fetched envelope
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Total page count reported by the last fetched envelope
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Failure records accumulated so far in this batch
    pub fn failures(&self) -> &[FailedJournal] {
        &self.failed
    }

    /// Drain the accumulated failure records
    pub fn take_failures(&mut self) -> Vec<FailedJournal> {
        std::mem::take(&mut self.failed)
    }

    /// Filter fetched records with an externally supplied predicate
    pub fn filter_records<T>(items: Vec<T>, condition: impl Fn(&T) -> bool) -> Vec<T> {
        items.into_iter().filter(|item| condition(item)).collect()
    }

    /// Look up a single record by business id
    ///
    /// Returns the cached record when present; otherwise issues a
    /// single-record request and expects exactly one entity data node in
    /// the response. Zero or more than one node is a
    /// [`WorkdayError::Cardinality`] consistency failure, surfaced to the
    /// caller and never retried. An empty `id` returns `None` without a
    /// call. Successful lookups are cached for the rest of the batch.
    pub async fn get_entity(
        &mut self,
        id: &str,
        criteria: &FetchCriteria,
    ) -> Result<Option<A::Record>> {
        if id.is_empty() {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(id) {
            return Ok(Some(cached.clone()));
        }

        let payload = self.adapter.single_request(id, criteria);
        let body = self.transport.post_xml(&self.config.endpoint, &payload).await?;
        let root = XmlNode::parse(&body)?;

        let path = self.adapter.data_path().to_string();
        let nodes = root.descendants(&path);

        let mut records = Vec::new();
        for node in nodes {
            records.push(self.adapter.parse(node).await?);
        }

        let count = records.len();
        let mut records = records.into_iter();
        match (records.next(), records.next()) {
            (Some(record), None) => {
                self.cache.insert(id.to_string(), record.clone());
                Ok(Some(record))
            }
            _ => Err(AbacusError::Workday(WorkdayError::Cardinality {
                kind: A::KIND,
                count,
            })),
        }
    }

    /// Look up a record by id in an endpoint that answers the full set in
    /// one response
    ///
    /// Scans every parsed entity node and returns the first whose derived
    /// id matches; `None` when nothing matches. An empty `id` returns
    /// `None` without a call.
    pub async fn search_entity(
        &mut self,
        id: &str,
        criteria: &FetchCriteria,
    ) -> Result<Option<A::Record>> {
        if id.is_empty() {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(id) {
            return Ok(Some(cached.clone()));
        }

        let payload = self.adapter.single_request(id, criteria);
        let body = self.transport.post_xml(&self.config.endpoint, &payload).await?;
        let root = XmlNode::parse(&body)?;

        let path = self.adapter.data_path().to_string();
        for node in root.descendants(&path) {
            if self.adapter.id_of(node).as_deref() == Some(id) {
                let record = self.adapter.parse(node).await?;
                self.cache.insert(id.to_string(), record.clone());
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    /// Fetch every page of the collection
    ///
    /// Resets the engine's per-batch state, fetches page 1, reads the
    /// pagination envelope to learn the iteration bound, then fetches the
    /// remaining pages strictly in sequence. A shortfall against the
    /// reported total is recorded in the completeness flag and logged,
    /// never raised.
    pub async fn get_all_entities(&mut self, criteria: &FetchCriteria) -> Result<Vec<A::Record>> {
        self.reset();

        let payload = self
            .adapter
            .page_request(self.next_page, self.config.page_size, criteria);
        let body = self.transport.post_xml(&self.config.endpoint, &payload).await?;
        let root = XmlNode::parse(&body)?;

        let envelope = ResponseResults::from_envelope(&root);
        self.total_pages = envelope.total_pages;
        self.total_records = envelope.total_results;
        self.next_page = envelope.page;

        let mut entities = self.parse_page(&root, 1).await;
        tracing::debug!(
            kind = A::KIND,
            page = 1,
            parsed = entities.len(),
            total_pages = self.total_pages,
            "Parsed first page"
        );
        self.accumulated.append(&mut entities);

        for page in 2..=self.total_pages {
            self.next_page = page;
            let payload = self.adapter.page_request(page, self.config.page_size, criteria);
            let body = self.transport.post_xml(&self.config.endpoint, &payload).await?;
            let root = XmlNode::parse(&body)?;

            let mut entities = self.parse_page(&root, page).await;
            tracing::debug!(
                kind = A::KIND,
                page = page,
                parsed = entities.len(),
                "Parsed page"
            );
            self.accumulated.append(&mut entities);
        }

        self.is_complete = self.accumulated.len() as u64 == self.total_records;
        if self.is_complete {
            tracing::info!(
                kind = A::KIND,
                fetched = self.accumulated.len(),
                "Fetched all reported records"
            );
        } else {
            tracing::warn!(
                kind = A::KIND,
                reported = self.total_records,
                fetched = self.accumulated.len(),
                "Fetched fewer records than the envelope reported"
            );
        }

        Ok(std::mem::take(&mut self.accumulated))
    }

    /// Fetch exactly one page of the collection
    ///
    /// Used when the full range is too large for one invocation. The
    /// completeness heuristic accepts a full page or the final, partial
    /// page (reported total modulo the requested count).
    pub async fn get_all_entities_by_page(
        &mut self,
        page: u32,
        count: u32,
        criteria: &FetchCriteria,
    ) -> Result<Vec<A::Record>> {
        self.next_page = page;
        let payload = self.adapter.page_request(page, count, criteria);
        let body = self.transport.post_xml(&self.config.endpoint, &payload).await?;
        let root = XmlNode::parse(&body)?;

        let envelope = ResponseResults::from_envelope(&root);
        self.total_pages = envelope.total_pages;
        self.total_records = envelope.total_results;

        let entities = self.parse_page(&root, page).await;

        let parsed = entities.len() as u64;
        let count = u64::from(count.max(1));
        self.is_complete = parsed == count || parsed == self.total_records % count;
        tracing::info!(
            kind = A::KIND,
            page = page,
            parsed = parsed,
            total_pages = self.total_pages,
            complete = self.is_complete,
            "Fetched single page"
        );

        Ok(entities)
    }

    /// Parse every entity node of one response page
    ///
    /// A node that fails to parse becomes a [`FailedJournal`] carrying the
    /// page number and a snapshot of the node; the rest of the page is
    /// still processed.
    async fn parse_page(&mut self, root: &XmlNode, page: u32) -> Vec<A::Record> {
        let path = self.adapter.data_path().to_string();
        let mut parsed = Vec::new();

        for node in root.descendants(&path) {
            match self.adapter.parse(node).await {
                Ok(record) => parsed.push(record),
                Err(error) => {
                    tracing::warn!(
                        kind = A::KIND,
                        page = page,
                        error = %error,
                        "Skipping record that failed to parse"
                    );
                    self.failed.push(
                        FailedJournal::new(
                            self.adapter.id_of(node),
                            error.to_string(),
                            format!("Could not process {} record at page {page}", A::KIND),
                        )
                        .with_data(node.to_string()),
                    );
                }
            }
        }

        parsed
    }

    fn reset(&mut self) {
        self.cache.clear();
        self.accumulated.clear();
        self.failed.clear();
        self.is_complete = false;
        self.next_page = 1;
        self.total_pages = 0;
        self.total_records = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use async_trait::async_trait;

    /// Minimal adapter over `<Item_Data>` nodes for engine tests
    struct ItemAdapter;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: i64,
    }

    #[async_trait]
    impl RecordAdapter for ItemAdapter {
        type Record = Item;
        const KIND: &'static str = "item";

        fn data_path(&self) -> &str {
            "Item_Data"
        }

        fn page_request(&self, page: u32, count: u32, _criteria: &FetchCriteria) -> String {
            format!("<Request><Page>{page}</Page><Count>{count}</Count></Request>")
        }

        fn single_request(&self, id: &str, _criteria: &FetchCriteria) -> String {
            format!("<Request><ID>{id}</ID></Request>")
        }

        fn id_of(&self, node: &XmlNode) -> Option<String> {
            node.text_of("Item_ID")
        }

        async fn parse(&mut self, node: &XmlNode) -> Result<Item> {
            let id = node
                .text_of("Item_ID")
                .ok_or_else(|| AbacusError::Xml("missing Item_ID".to_string()))?;
            let value = node
                .int_of("Value")
                .ok_or_else(|| AbacusError::Xml("missing Value".to_string()))?;
            Ok(Item { id, value })
        }
    }

    fn page_body(total: u64, pages: u32, page: u32, items: &[(&str, i64)]) -> String {
        let mut body = format!(
            "<Response><Response_Results>\
             <Total_Results>{total}</Total_Results>\
             <Total_Pages>{pages}</Total_Pages>\
             <Page_Results>{}</Page_Results>\
             <Page>{page}</Page>\
             </Response_Results><Response_Data>",
            items.len()
        );
        for (id, value) in items {
            body.push_str(&format!(
                "<Item_Data><Item_ID>{id}</Item_ID><Value>{value}</Value></Item_Data>"
            ));
        }
        body.push_str("</Response_Data></Response>");
        body
    }

    fn engine(endpoint: String) -> FetchEngine<ItemAdapter> {
        let transport = Transport::new(
            "tok",
            10,
            RetryConfig {
                max_attempts: 1,
                delay_ms: 1,
            },
        )
        .unwrap();
        FetchEngine::new(ItemAdapter, transport, EngineConfig::new(endpoint, 2))
    }

    #[tokio::test]
    async fn test_get_all_entities_walks_every_page_in_order() {
        let mut server = mockito::Server::new_async().await;
        let page1 = server
            .mock("POST", "/svc")
            .match_body(mockito::Matcher::Regex("<Page>1</Page>".to_string()))
            .with_body(page_body(3, 2, 1, &[("A", 1), ("B", 2)]))
            .expect(1)
            .create_async()
            .await;
        let page2 = server
            .mock("POST", "/svc")
            .match_body(mockito::Matcher::Regex("<Page>2</Page>".to_string()))
            .with_body(page_body(3, 2, 2, &[("C", 3)]))
            .expect(1)
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let items = engine.get_all_entities(&FetchCriteria::none()).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "A");
        assert_eq!(items[2].id, "C");
        assert!(engine.is_complete());
        assert_eq!(engine.total_pages(), 2);
        page1.assert_async().await;
        page2.assert_async().await;
    }

    #[tokio::test]
    async fn test_incomplete_fetch_is_flagged_not_raised() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .with_body(page_body(5, 1, 1, &[("A", 1)]))
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let items = engine.get_all_entities(&FetchCriteria::none()).await.unwrap();

        assert_eq!(items.len(), 1);
        assert!(!engine.is_complete());
    }

    #[tokio::test]
    async fn test_accumulator_reset_between_invocations() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .with_body(page_body(1, 1, 1, &[("A", 1)]))
            .expect(2)
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let first = engine.get_all_entities(&FetchCriteria::none()).await.unwrap();
        let second = engine.get_all_entities(&FetchCriteria::none()).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_bad_record_is_recorded_and_skipped() {
        let mut server = mockito::Server::new_async().await;
        let body = "<Response><Response_Results>\
             <Total_Results>2</Total_Results><Total_Pages>1</Total_Pages>\
             <Page_Results>2</Page_Results><Page>1</Page></Response_Results>\
             <Item_Data><Item_ID>GOOD</Item_ID><Value>1</Value></Item_Data>\
             <Item_Data><Item_ID>BAD</Item_ID></Item_Data>\
             </Response>";
        server.mock("POST", "/svc").with_body(body).create_async().await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let items = engine.get_all_entities(&FetchCriteria::none()).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "GOOD");
        assert!(!engine.is_complete());

        let failures = engine.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].journal_id.as_deref(), Some("BAD"));
        assert!(failures[0].reason.contains("page 1"));
        assert!(!failures[0].reason.is_empty());
        assert!(failures[0].data.as_deref().unwrap().contains("BAD"));
    }

    #[tokio::test]
    async fn test_get_entity_caches_lookups() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/svc")
            .with_body("<Response><Item_Data><Item_ID>X</Item_ID><Value>7</Value></Item_Data></Response>")
            .expect(1)
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let first = engine
            .get_entity("X", &FetchCriteria::none())
            .await
            .unwrap()
            .unwrap();
        let second = engine
            .get_entity("X", &FetchCriteria::none())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.value, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_entity_empty_id_makes_no_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/svc")
            .with_body("ignored")
            .expect(0)
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let result = engine.get_entity("", &FetchCriteria::none()).await.unwrap();

        assert!(result.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_entity_cardinality_violation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .with_body(
                "<Response>\
                 <Item_Data><Item_ID>X</Item_ID><Value>1</Value></Item_Data>\
                 <Item_Data><Item_ID>X</Item_ID><Value>2</Value></Item_Data>\
                 </Response>",
            )
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let result = engine.get_entity("X", &FetchCriteria::none()).await;

        assert!(matches!(
            result,
            Err(AbacusError::Workday(WorkdayError::Cardinality { count: 2, .. }))
        ));
    }

    #[tokio::test]
    async fn test_get_entity_zero_records_is_cardinality_zero() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .with_body("<Response></Response>")
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let result = engine.get_entity("X", &FetchCriteria::none()).await;

        assert!(matches!(
            result,
            Err(AbacusError::Workday(WorkdayError::Cardinality { count: 0, .. }))
        ));
    }

    #[tokio::test]
    async fn test_search_entity_scans_full_set() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .with_body(
                "<Response>\
                 <Item_Data><Item_ID>A</Item_ID><Value>1</Value></Item_Data>\
                 <Item_Data><Item_ID>B</Item_ID><Value>2</Value></Item_Data>\
                 </Response>",
            )
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));
        let found = engine
            .search_entity("B", &FetchCriteria::none())
            .await
            .unwrap();
        assert_eq!(found.map(|i| i.value), Some(2));

        let missing = engine
            .search_entity("Z", &FetchCriteria::none())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_by_page_completeness_full_and_final_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/svc")
            .match_body(mockito::Matcher::Regex("<Page>1</Page>".to_string()))
            .with_body(page_body(3, 2, 1, &[("A", 1), ("B", 2)]))
            .create_async()
            .await;
        server
            .mock("POST", "/svc")
            .match_body(mockito::Matcher::Regex("<Page>2</Page>".to_string()))
            .with_body(page_body(3, 2, 2, &[("C", 3)]))
            .create_async()
            .await;

        let mut engine = engine(format!("{}/svc", server.url()));

        let full = engine
            .get_all_entities_by_page(1, 2, &FetchCriteria::none())
            .await
            .unwrap();
        assert_eq!(full.len(), 2);
        assert!(engine.is_complete());

        let partial = engine
            .get_all_entities_by_page(2, 2, &FetchCriteria::none())
            .await
            .unwrap();
        assert_eq!(partial.len(), 1);
        // 3 % 2 == 1, the final short page counts as complete
        assert!(engine.is_complete());
    }

    #[test]
    fn test_filter_records_applies_predicate() {
        let items = vec![1, 2, 3, 4];
        let kept = FetchEngine::<ItemAdapter>::filter_records(items, |v| v % 2 == 0);
        assert_eq!(kept, vec![2, 4]);
    }
}
