//! Pagination envelope
//!
//! Every paged response carries a `Response_Results` block describing the
//! full result set. It is parsed fresh from every page and drives the
//! iteration bound of a full fetch.

use crate::adapters::workday::xml::XmlNode;

/// Parsed `Response_Results` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseResults {
    pub total_results: u64,
    pub total_pages: u32,
    pub page_results: u64,
    pub page: u32,
}

impl ResponseResults {
    /// Extract the pagination block from a response document
    ///
    /// A response without the block (some endpoints answer the full set in
    /// one payload) yields the single-page default.
    pub fn from_envelope(root: &XmlNode) -> Self {
        let Some(block) = root.descendant("Response_Results") else {
            return Self::default();
        };

        Self {
            total_results: block.int_of("Total_Results").unwrap_or(0).max(0) as u64,
            total_pages: block.int_of("Total_Pages").unwrap_or(1).max(1) as u32,
            page_results: block.int_of("Page_Results").unwrap_or(0).max(0) as u64,
            // zero would stall the loop, the first page is always 1
            page: block.int_of("Page").unwrap_or(1).max(1) as u32,
        }
    }
}

impl Default for ResponseResults {
    fn default() -> Self {
        Self {
            total_results: 0,
            total_pages: 1,
            page_results: 0,
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_block() {
        let xml = r#"<Response>
            <Response_Results>
                <Total_Results>2405</Total_Results>
                <Total_Pages>3</Total_Pages>
                <Page_Results>999</Page_Results>
                <Page>2</Page>
            </Response_Results>
        </Response>"#;
        let root = XmlNode::parse(xml).unwrap();

        let results = ResponseResults::from_envelope(&root);
        assert_eq!(results.total_results, 2405);
        assert_eq!(results.total_pages, 3);
        assert_eq!(results.page_results, 999);
        assert_eq!(results.page, 2);
    }

    #[test]
    fn test_missing_block_defaults_to_single_page() {
        let root = XmlNode::parse("<Response><Data/></Response>").unwrap();
        let results = ResponseResults::from_envelope(&root);
        assert_eq!(results, ResponseResults::default());
        assert_eq!(results.total_pages, 1);
        assert_eq!(results.page, 1);
    }

    #[test]
    fn test_missing_page_defaults_to_one() {
        let xml = r#"<Response>
            <Response_Results>
                <Total_Results>10</Total_Results>
                <Total_Pages>1</Total_Pages>
                <Page_Results>10</Page_Results>
            </Response_Results>
        </Response>"#;
        let root = XmlNode::parse(xml).unwrap();
        assert_eq!(ResponseResults::from_envelope(&root).page, 1);
    }
}
