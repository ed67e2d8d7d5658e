//! The pagination engine.
//!
//! [`Paginator`] translates a [`PageRequest`](crate::request::PageRequest)
//! into a [`FindQuery`](crate::query::FindQuery), delegates execution to a
//! [`DocumentSource`](crate::source::DocumentSource), and shapes the raw
//! record batch into a [`Page`](crate::page::Page) with navigation tokens.
//!
//! # Strategies
//!
//! - **Offset** — `skip = (page_number - 1) * limit` with a sort on the
//!   configured id field. Exact pass-through of the store's windowing.
//! - **Cursor** — seek on the record identifier: `after` becomes an
//!   identifier bound past the token's value, `before` the reverse bound
//!   fetched in reversed order and re-reversed, so every page renders in
//!   canonical order.
//! - **Time** — the cursor algorithm on a caller-chosen field. Since that
//!   field may hold duplicates, boundaries carry a compound
//!   `(field_value, identifier)` token and seek with
//!   `field OP value OR (field == value AND id OP tie)`; single-value
//!   tokens remain accepted and fall back to the plain bound.
//!
//! All strategies fetch `limit + 1` records; the sentinel's presence is
//! what sets the continuation token for the direction being paged, and it
//! is trimmed before the page is returned.
//!
//! The engine is stateless beyond its configuration: no locks, no caches,
//! no retries. It suspends only at the delegated `find`/`count` calls and
//! relays their failures as [`PaginationError::Store`] with the active
//! strategy and phase attached.

use bson::Bson;
use tracing::debug;

use crate::{
    error::{PaginateResult, PaginationError},
    page::Page,
    query::{Expr, FieldOp, Filter, FindQuery, SortDirection},
    request::{OffsetPage, PageRequest, PaginatorConfig, Strategy},
    source::DocumentSource,
    token::PageToken,
};

/// Stateless pagination engine over an external document source.
///
/// Safe to share across tasks; each call is independent.
#[derive(Debug, Clone)]
pub struct Paginator {
    config: PaginatorConfig,
}

impl Paginator {
    /// Creates an engine with explicit configuration.
    pub fn new(config: PaginatorConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine was constructed with.
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Fetches one page of records from `collection`.
    ///
    /// `base_filter` carries the caller's query constraints unrelated to
    /// pagination and passes through to the source untouched; the engine
    /// only appends its own seek bounds. `direction` is the canonical sort
    /// direction of the overall sequence, regardless of which way the
    /// request pages.
    ///
    /// The returned page never carries a total; counting is a separate,
    /// explicit operation (see [`Paginator::paginate_with_total`]).
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidToken`] when a resume token is
    /// malformed or was minted by another strategy or sort field, and
    /// [`PaginationError::Store`] when the source fails.
    pub async fn paginate<S: DocumentSource>(
        &self,
        source: &S,
        collection: &str,
        base_filter: Option<Expr>,
        request: &PageRequest,
        direction: SortDirection,
    ) -> PaginateResult<Page<Bson>> {
        debug!(
            strategy = %request.strategy(),
            collection,
            limit = request.limit(),
            "paginating collection"
        );

        match request {
            PageRequest::Offset(page) => {
                self.offset_page(source, collection, base_filter, page, direction)
                    .await
            }
            PageRequest::Cursor(page) => {
                let seek = Seek {
                    strategy: Strategy::Cursor,
                    field: &self.config.id_field,
                    after: page.after_token(),
                    before: page.before_token(),
                    limit: page.limit(),
                    compound: false,
                };

                self.seek_page(source, collection, base_filter, seek, direction)
                    .await
            }
            PageRequest::Time(page) => {
                let seek = Seek {
                    strategy: Strategy::Time,
                    field: page.sort_field(),
                    after: page.after_token(),
                    before: page.before_token(),
                    limit: page.limit(),
                    compound: true,
                };

                self.seek_page(source, collection, base_filter, seek, direction)
                    .await
            }
        }
    }

    /// Fetches one page and additionally counts all records matching
    /// `base_filter`, independent of the page window.
    ///
    /// Issues one extra `count` call against the source; prefer
    /// [`Paginator::paginate`] when the total is not needed.
    pub async fn paginate_with_total<S: DocumentSource>(
        &self,
        source: &S,
        collection: &str,
        base_filter: Option<Expr>,
        request: &PageRequest,
        direction: SortDirection,
    ) -> PaginateResult<Page<Bson>> {
        let total = source
            .count(collection, base_filter.clone())
            .await
            .map_err(|e| PaginationError::store(format!("{} count", request.strategy()), e))?;

        let mut page = self
            .paginate(source, collection, base_filter, request, direction)
            .await?;
        page.total = Some(total);

        Ok(page)
    }

    /// Counts the records matching `filter`. Pure delegation to the
    /// source's count primitive.
    pub async fn count<S: DocumentSource>(
        &self,
        source: &S,
        collection: &str,
        filter: Option<Expr>,
    ) -> PaginateResult<u64> {
        source
            .count(collection, filter)
            .await
            .map_err(|e| PaginationError::store("count", e))
    }

    /// Skip/limit paging sorted on the configured id field.
    ///
    /// Ordering stability over a non-unique sort key is the caller's
    /// responsibility; the default id field is unique by convention.
    async fn offset_page<S: DocumentSource>(
        &self,
        source: &S,
        collection: &str,
        base_filter: Option<Expr>,
        page: &OffsetPage,
        direction: SortDirection,
    ) -> PaginateResult<Page<Bson>> {
        let query = FindQuery::builder()
            .maybe_filter(base_filter)
            .sort(self.config.id_field.clone(), direction)
            .skip(page.skip())
            .limit(page.limit() + 1)
            .build();

        let mut items = source
            .find(collection, query)
            .await
            .map_err(|e| PaginationError::store("offset find", e))?;

        let has_more = items.len() as u64 > page.limit();
        if has_more {
            items.truncate(page.limit() as usize);
        }

        let next_token = if has_more {
            Some(self.offset_token(page.page_number() + 1)?)
        } else {
            None
        };
        let prev_token = if page.page_number() > 1 {
            Some(self.offset_token(page.page_number() - 1)?)
        } else {
            None
        };

        Ok(Page::builder(items)
            .with_next_token(next_token)
            .with_prev_token(prev_token)
            .build())
    }

    /// Shared seek algorithm for cursor and time pagination.
    async fn seek_page<S: DocumentSource>(
        &self,
        source: &S,
        collection: &str,
        base_filter: Option<Expr>,
        seek: Seek<'_>,
        direction: SortDirection,
    ) -> PaginateResult<Page<Bson>> {
        let boundary = match (seek.after, seek.before) {
            (Some(token), None) => Some((PageToken::decode(token, seek.strategy)?, false)),
            (None, Some(token)) => Some((PageToken::decode(token, seek.strategy)?, true)),
            (None, None) => None,
            (Some(_), Some(_)) => {
                // Request constructors forbid this; kept for exhaustiveness.
                return Err(PaginationError::InvalidRequest(
                    "at most one of `after` and `before` may be set".to_string(),
                ));
            }
        };

        if let Some((token, _)) = &boundary {
            if token.field != seek.field {
                return Err(PaginationError::InvalidToken(format!(
                    "token seeks on field `{}`, request sorts on `{}`",
                    token.field, seek.field,
                )));
            }
        }

        let paging_back = matches!(&boundary, Some((_, true)));
        let filter = match &boundary {
            Some((token, back)) => {
                let bound = self.seek_expr(&seek, token, direction, *back);

                Some(match base_filter {
                    Some(base) => base.and(bound),
                    None => bound,
                })
            }
            None => base_filter,
        };

        // Backward pages are fetched in reversed order and re-reversed so
        // the page always renders in canonical order.
        let fetch_direction = if paging_back {
            direction.reverse()
        } else {
            direction
        };
        let query = FindQuery::builder()
            .maybe_filter(filter)
            .sort(seek.field, fetch_direction)
            .limit(seek.limit + 1)
            .build();

        let mut items = source
            .find(collection, query)
            .await
            .map_err(|e| PaginationError::store(format!("{} find", seek.strategy), e))?;

        let has_more = items.len() as u64 > seek.limit;
        if has_more {
            items.truncate(seek.limit as usize);
        }
        if paging_back {
            items.reverse();
        }

        let mut next_token = None;
        let mut prev_token = None;
        if let (Some(first), Some(last)) = (items.first(), items.last()) {
            if paging_back {
                next_token = Some(self.boundary_token(&seek, last)?.encode()?);
                if has_more {
                    prev_token = Some(self.boundary_token(&seek, first)?.encode()?);
                }
            } else {
                if has_more {
                    next_token = Some(self.boundary_token(&seek, last)?.encode()?);
                }
                // A first page has nothing before it; only requests that
                // resumed from a token can page back.
                if boundary.is_some() {
                    prev_token = Some(self.boundary_token(&seek, first)?.encode()?);
                }
            }
        }

        Ok(Page::builder(items)
            .with_next_token(next_token)
            .with_prev_token(prev_token)
            .build())
    }

    /// Builds the seek predicate for a decoded boundary token.
    fn seek_expr(
        &self,
        seek: &Seek<'_>,
        token: &PageToken,
        direction: SortDirection,
        back: bool,
    ) -> Expr {
        let op = match (direction, back) {
            (SortDirection::Asc, false) | (SortDirection::Desc, true) => FieldOp::Gt,
            (SortDirection::Desc, false) | (SortDirection::Asc, true) => FieldOp::Lt,
        };

        let bound = Expr::field(seek.field.to_string(), op.clone(), token.value.clone());

        match &token.tie_breaker {
            Some(tie) => Filter::or([
                bound,
                Filter::and([
                    Expr::field(seek.field.to_string(), FieldOp::Eq, token.value.clone()),
                    Expr::field(self.config.id_field.clone(), op, tie.clone()),
                ]),
            ]),
            None => bound,
        }
    }

    /// Mints the boundary token for a page-edge record.
    fn boundary_token(&self, seek: &Seek<'_>, record: &Bson) -> PaginateResult<PageToken> {
        let document = record.as_document().ok_or_else(|| {
            PaginationError::InvalidRecord("record is not a document".to_string())
        })?;
        let value = document.get(seek.field).cloned().ok_or_else(|| {
            PaginationError::InvalidRecord(format!(
                "record is missing boundary field `{}`",
                seek.field,
            ))
        })?;

        if !seek.compound {
            return Ok(PageToken::new(seek.strategy, seek.field, value));
        }

        // Records without an identifier still get a usable single-value
        // token; ties at that boundary are then the caller's risk.
        match document.get(&self.config.id_field).cloned() {
            Some(id) => Ok(PageToken::compound(seek.strategy, seek.field, value, id)),
            None => Ok(PageToken::new(seek.strategy, seek.field, value)),
        }
    }

    fn offset_token(&self, page_number: u64) -> PaginateResult<String> {
        PageToken::new(
            Strategy::Offset,
            &self.config.id_field,
            Bson::Int64(page_number as i64),
        )
        .encode()
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginatorConfig::default())
    }
}

/// Per-call parameters of the shared seek algorithm.
struct Seek<'a> {
    strategy: Strategy,
    field: &'a str,
    after: Option<&'a str>,
    before: Option<&'a str>,
    limit: u64,
    compound: bool,
}
