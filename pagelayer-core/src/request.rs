//! Page request types: one validated configuration struct per strategy.
//!
//! A [`PageRequest`] is a tagged union over three pagination strategies.
//! Each variant enforces its invariants at construction time, so an engine
//! receiving a request can rely on `limit > 0`, `page_number >= 1`, and
//! at most one of after/before being set.

use bson::Bson;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{PaginateResult, PaginationError},
    query::SortDirection,
    token::PageToken,
};

/// Identifies which pagination strategy minted a token or shaped a request.
///
/// Tokens carry this tag so that a token from one strategy is rejected by
/// another instead of being silently misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Seek relative to the record identifier.
    Cursor,
    /// Seek relative to a caller-chosen orderable field.
    Time,
    /// Classic skip/limit paging by page number.
    Offset,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Cursor => write!(f, "cursor"),
            Strategy::Time => write!(f, "time"),
            Strategy::Offset => write!(f, "offset"),
        }
    }
}

/// Cursor-based page request: seeks relative to the record identifier.
///
/// The sort key is fixed to the configured id field, which must hold a
/// totally ordered, monotonically assignable value (an ObjectId, an
/// integer sequence) for paging to be stable.
#[derive(Debug, Clone)]
pub struct CursorPage {
    after: Option<String>,
    before: Option<String>,
    limit: u64,
}

impl CursorPage {
    /// Creates a first-page request with the given page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if `limit` is zero.
    pub fn new(limit: u64) -> PaginateResult<Self> {
        check_limit(limit)?;

        Ok(CursorPage { after: None, before: None, limit })
    }

    /// Resumes forward from an opaque `next_token`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if a `before` token is
    /// already set; a request seeks in exactly one direction.
    pub fn after(mut self, token: impl Into<String>) -> PaginateResult<Self> {
        if self.before.is_some() {
            return Err(conflicting_tokens());
        }
        self.after = Some(token.into());

        Ok(self)
    }

    /// Resumes backward from an opaque `prev_token`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if an `after` token is
    /// already set.
    pub fn before(mut self, token: impl Into<String>) -> PaginateResult<Self> {
        if self.after.is_some() {
            return Err(conflicting_tokens());
        }
        self.before = Some(token.into());

        Ok(self)
    }

    /// The requested page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The forward resume token, if set.
    pub fn after_token(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// The backward resume token, if set.
    pub fn before_token(&self) -> Option<&str> {
        self.before.as_deref()
    }
}

/// Time-based page request: seeks relative to a caller-chosen field.
///
/// Works like [`CursorPage`] but the comparison field is arbitrary, so it
/// may be non-unique. The engine compensates with compound
/// `(field_value, identifier)` tokens; see the module docs on
/// [`crate::paginate`] for the exact tie-breaking predicate.
#[derive(Debug, Clone)]
pub struct TimePage {
    sort_field: String,
    after: Option<String>,
    before: Option<String>,
    limit: u64,
}

impl TimePage {
    /// Creates a first-page request seeking on `sort_field`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if `limit` is zero or
    /// the sort field is empty.
    pub fn new(sort_field: impl Into<String>, limit: u64) -> PaginateResult<Self> {
        check_limit(limit)?;

        let sort_field = sort_field.into();
        if sort_field.is_empty() {
            return Err(PaginationError::InvalidRequest(
                "sort field must not be empty".to_string(),
            ));
        }

        Ok(TimePage { sort_field, after: None, before: None, limit })
    }

    /// Resumes forward from an opaque `next_token`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if a `before` token is
    /// already set.
    pub fn after(mut self, token: impl Into<String>) -> PaginateResult<Self> {
        if self.before.is_some() {
            return Err(conflicting_tokens());
        }
        self.after = Some(token.into());

        Ok(self)
    }

    /// Resumes backward from an opaque `prev_token`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if an `after` token is
    /// already set.
    pub fn before(mut self, token: impl Into<String>) -> PaginateResult<Self> {
        if self.after.is_some() {
            return Err(conflicting_tokens());
        }
        self.before = Some(token.into());

        Ok(self)
    }

    /// The field records are ordered and sought by.
    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    /// The requested page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The forward resume token, if set.
    pub fn after_token(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// The backward resume token, if set.
    pub fn before_token(&self) -> Option<&str> {
        self.before.as_deref()
    }
}

/// Offset-based page request: classic skip/limit paging.
///
/// Deterministic ordering requires a sort key with a total order. Over a
/// field with duplicate values, skip/limit paging is not guaranteed stable
/// across calls; arranging a unique sort key (conventionally the record
/// identifier) is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct OffsetPage {
    page_number: u64,
    limit: u64,
}

impl OffsetPage {
    /// Creates a request for the given 1-indexed page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidRequest`] if `page_number` is zero,
    /// `limit` is zero, or the page's skip does not fit in a `u64`.
    pub fn new(page_number: u64, limit: u64) -> PaginateResult<Self> {
        check_limit(limit)?;

        if page_number < 1 {
            return Err(PaginationError::InvalidRequest(
                "page number must be 1 or greater".to_string(),
            ));
        }
        if (page_number - 1).checked_mul(limit).is_none() {
            return Err(PaginationError::InvalidRequest(
                "page window exceeds the representable record range".to_string(),
            ));
        }

        Ok(OffsetPage { page_number, limit })
    }

    /// Reconstructs an offset request from an offset-tagged token.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidToken`] if the token was minted by
    /// another strategy or does not carry a page number, and
    /// [`PaginationError::InvalidRequest`] if `limit` is zero.
    pub fn from_token(token: &str, limit: u64) -> PaginateResult<Self> {
        let token = PageToken::decode(token, Strategy::Offset)?;
        // The JSON round trip may narrow the page number to Int32.
        let page_number = match token.value {
            Bson::Int32(page) => Some(page as i64),
            Bson::Int64(page) => Some(page),
            _ => None,
        }
        .filter(|page| *page >= 1)
        .ok_or_else(|| {
            PaginationError::InvalidToken(
                "offset token does not carry a valid page number".to_string(),
            )
        })?;

        OffsetPage::new(page_number as u64, limit)
    }

    /// The requested 1-indexed page number.
    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    /// The requested page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The number of records to skip for this page.
    pub fn skip(&self) -> u64 {
        (self.page_number - 1) * self.limit
    }
}

/// A page request: exactly one strategy is active per request.
#[derive(Debug, Clone)]
pub enum PageRequest {
    /// Seek relative to the record identifier.
    Cursor(CursorPage),
    /// Seek relative to a caller-chosen orderable field.
    Time(TimePage),
    /// Skip/limit paging by page number.
    Offset(OffsetPage),
}

impl PageRequest {
    /// The strategy this request selects.
    pub fn strategy(&self) -> Strategy {
        match self {
            PageRequest::Cursor(_) => Strategy::Cursor,
            PageRequest::Time(_) => Strategy::Time,
            PageRequest::Offset(_) => Strategy::Offset,
        }
    }

    /// The requested page size.
    pub fn limit(&self) -> u64 {
        match self {
            PageRequest::Cursor(page) => page.limit(),
            PageRequest::Time(page) => page.limit(),
            PageRequest::Offset(page) => page.limit(),
        }
    }
}

impl From<CursorPage> for PageRequest {
    fn from(page: CursorPage) -> Self {
        PageRequest::Cursor(page)
    }
}

impl From<TimePage> for PageRequest {
    fn from(page: TimePage) -> Self {
        PageRequest::Time(page)
    }
}

impl From<OffsetPage> for PageRequest {
    fn from(page: OffsetPage) -> Self {
        PageRequest::Offset(page)
    }
}

/// Configuration for a [`Paginator`](crate::paginate::Paginator).
///
/// Passed explicitly to the engine constructor; there is no ambient global
/// state. The defaults mirror common document-store conventions.
#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// The field holding the record identifier. Cursor pagination seeks on
    /// it, time pagination uses it as tie breaker, offset pagination sorts
    /// by it.
    pub id_field: String,
    /// Page size for callers that do not choose one.
    pub default_limit: u64,
    /// Sort direction for callers that do not choose one.
    pub default_direction: SortDirection,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        PaginatorConfig {
            id_field: "_id".to_string(),
            default_limit: 20,
            default_direction: SortDirection::Desc,
        }
    }
}

fn check_limit(limit: u64) -> PaginateResult<()> {
    if limit == 0 {
        return Err(PaginationError::InvalidRequest(
            "limit must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn conflicting_tokens() -> PaginationError {
    PaginationError::InvalidRequest(
        "at most one of `after` and `before` may be set".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(
            CursorPage::new(0),
            Err(PaginationError::InvalidRequest(_))
        ));
        assert!(matches!(
            TimePage::new("created_at", 0),
            Err(PaginationError::InvalidRequest(_))
        ));
        assert!(matches!(
            OffsetPage::new(1, 0),
            Err(PaginationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn page_number_must_be_at_least_one() {
        assert!(matches!(
            OffsetPage::new(0, 10),
            Err(PaginationError::InvalidRequest(_))
        ));
        assert_eq!(OffsetPage::new(3, 10).unwrap().skip(), 20);
    }

    #[test]
    fn after_and_before_are_mutually_exclusive() {
        let request = CursorPage::new(5).unwrap().after("tok").unwrap();
        assert!(matches!(
            request.before("tok"),
            Err(PaginationError::InvalidRequest(_))
        ));

        let request = TimePage::new("created_at", 5)
            .unwrap()
            .before("tok")
            .unwrap();
        assert!(matches!(
            request.after("tok"),
            Err(PaginationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn empty_sort_field_is_rejected() {
        assert!(matches!(
            TimePage::new("", 5),
            Err(PaginationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn offset_token_round_trip_survives_integer_narrowing() {
        // Encoding goes through JSON, which hands small integers back as
        // Int32 even when they were minted as Int64.
        let encoded = PageToken::new(Strategy::Offset, "_id", Bson::Int64(3))
            .encode()
            .unwrap();
        let request = OffsetPage::from_token(&encoded, 5).unwrap();

        assert_eq!(request.page_number(), 3);
        assert_eq!(request.skip(), 10);

        let encoded = PageToken::new(Strategy::Offset, "_id", Bson::Int32(2))
            .encode()
            .unwrap();
        assert_eq!(OffsetPage::from_token(&encoded, 5).unwrap().page_number(), 2);
    }

    #[test]
    fn offset_token_without_a_page_number_is_rejected() {
        let encoded = PageToken::new(Strategy::Offset, "_id", Bson::String("x".to_string()))
            .encode()
            .unwrap();
        assert!(matches!(
            OffsetPage::from_token(&encoded, 5),
            Err(PaginationError::InvalidToken(_))
        ));
    }

    #[test]
    fn oversized_page_window_is_rejected() {
        assert!(matches!(
            OffsetPage::new(u64::MAX, 2),
            Err(PaginationError::InvalidRequest(_))
        ));
        // The largest representable window is still accepted.
        assert!(OffsetPage::new(u64::MAX, 1).is_ok());
    }

    #[test]
    fn request_reports_its_strategy() {
        let request = PageRequest::from(CursorPage::new(5).unwrap());
        assert_eq!(request.strategy(), Strategy::Cursor);
        assert_eq!(request.limit(), 5);
    }
}
