//! KuCoin's page envelope for history endpoints.
//!
//! Paginated endpoints return:
//!
//! ```json
//! {
//!     "currentPage": 1,
//!     "pageSize": 50,
//!     "totalNum": 1,
//!     "totalPage": 1,
//!     "items": [...]
//! }
//! ```

use serde::Deserialize;

/// One page of a larger record set.
///
/// # Example
///
/// ```rust
/// use kucoin_margin_client::types::Paginated;
///
/// #[derive(Debug, serde::Deserialize)]
/// struct Item {
///     id: String,
/// }
///
/// let json = r#"{"currentPage":2,"pageSize":1,"totalNum":3,"totalPage":3,"items":[{"id":"b"}]}"#;
/// let page: Paginated<Item> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.current_page, 2);
/// assert!(page.has_next_page());
/// assert_eq!(page.items[0].id, "b");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// The page number of this page, starting at 1.
    pub current_page: u32,
    /// Number of records per page.
    pub page_size: u32,
    /// Total number of records across all pages.
    #[serde(rename = "totalNum")]
    pub total_items: u64,
    /// Total number of pages.
    #[serde(rename = "totalPage")]
    pub total_pages: u32,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    /// Check if there are pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Map the records to a different type, keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Paginated<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
