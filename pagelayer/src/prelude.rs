//! Convenient re-exports of commonly used types from pagelayer.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use pagelayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - The pagination engine and its configuration
//! - Page request and result types
//! - Query construction and filtering
//! - Source traits and builders
//! - Error types

pub use pagelayer_core::{
    error::{PaginateResult, PaginationError, SourceError},
    page::{Page, PageBuilder},
    paginate::Paginator,
    query::{Expr, FieldOp, Filter, FindQuery, FindQueryBuilder, QueryVisitor, Sort, SortDirection},
    request::{CursorPage, OffsetPage, PageRequest, PaginatorConfig, Strategy, TimePage},
    source::{DocumentSource, DocumentSourceBuilder},
    token::PageToken,
};
