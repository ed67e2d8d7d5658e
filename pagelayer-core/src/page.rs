//! Page result types for shaped query batches.
//!
//! A [`Page`] is the engine's output: the records of one window over a
//! result set, the opaque tokens to reach the adjacent windows, and an
//! optional total count. Pages are transient — constructed per call, never
//! persisted; only their tokens cross request boundaries.

use bson::{Bson, de::deserialize_from_bson};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::PaginateResult;

/// A single page of paginated results.
///
/// # Type Parameters
///
/// * `T` - The type of items contained in this page
///
/// # Example
///
/// ```ignore
/// use pagelayer::page::Page;
///
/// let page: Page<String> = Page::builder(vec!["item1".to_string()])
///     .with_next_token(Some("opaque".to_string()))
///     .build();
///
/// assert_eq!(page.items.len(), 1);
/// assert!(page.total.is_none());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The records in this page, in canonical sort order.
    pub items: Vec<T>,
    /// Opaque token resuming after the last item, when more data exists in
    /// that direction.
    pub next_token: Option<String>,
    /// Opaque token resuming before the first item, when earlier data
    /// exists in that direction.
    pub prev_token: Option<String>,
    /// Total matching records across all pages. Present only when the
    /// caller explicitly requested a count.
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a new builder for constructing a page.
    pub fn builder(items: Vec<T>) -> PageBuilder<T> {
        PageBuilder::new(items)
    }

    /// Whether this page has a continuation in the forward direction.
    pub fn has_next(&self) -> bool {
        self.next_token.is_some()
    }

    /// Whether this page has a continuation in the backward direction.
    pub fn has_prev(&self) -> bool {
        self.prev_token.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_token: None,
            prev_token: None,
            total: None,
        }
    }
}

impl Page<Bson> {
    /// Deserializes each raw record into a typed item, preserving tokens
    /// and total.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if any record does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> PaginateResult<Page<T>> {
        Ok(Page {
            items: self
                .items
                .into_iter()
                .map(|record| deserialize_from_bson(record))
                .collect::<Result<Vec<T>, _>>()?,
            next_token: self.next_token,
            prev_token: self.prev_token,
            total: self.total,
        })
    }
}

/// Builder for constructing [`Page`] instances with a fluent API.
pub struct PageBuilder<T> {
    items: Vec<T>,
    next_token: Option<String>,
    prev_token: Option<String>,
    total: Option<u64>,
}

impl<T> PageBuilder<T> {
    /// Creates a new builder with the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
            prev_token: None,
            total: None,
        }
    }

    /// Sets the forward continuation token (or `None` on the last page).
    pub fn with_next_token(mut self, next_token: Option<String>) -> Self {
        self.next_token = next_token;
        self
    }

    /// Sets the backward continuation token (or `None` on the first page).
    pub fn with_prev_token(mut self, prev_token: Option<String>) -> Self {
        self.prev_token = prev_token;
        self
    }

    /// Sets the total count of matching records across all pages.
    pub fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    /// Builds and returns the final [`Page`].
    pub fn build(self) -> Page<T> {
        Page {
            items: self.items,
            next_token: self.next_token,
            prev_token: self.prev_token,
            total: self.total,
        }
    }
}
