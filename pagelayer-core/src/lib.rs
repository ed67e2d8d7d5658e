//! A pagination and query-shaping layer that sits in front of an external
//! document store.
//!
//! This crate is the core of the pagelayer project and provides:
//!
//! - **Page requests** ([`request`]) - Validated, per-strategy request types
//! - **Pagination engine** ([`paginate`]) - Translates requests into store queries and shapes results
//! - **Opaque tokens** ([`token`]) - Self-describing, strategy-tagged resume tokens
//! - **Query construction** ([`query`]) - Filter expressions and derived query bounds
//! - **Source abstraction** ([`source`]) - The find/count collaborator trait
//! - **Page results** ([`page`]) - Shaped result windows with navigation tokens
//! - **Error handling** ([`error`]) - Classification and context-preserving propagation
//!
//! # Example
//!
//! ```ignore
//! use pagelayer_core::{
//!     paginate::Paginator,
//!     query::{Filter, SortDirection},
//!     request::{CursorPage, PageRequest, PaginatorConfig},
//! };
//!
//! let paginator = Paginator::new(PaginatorConfig::default());
//! let request = PageRequest::from(CursorPage::new(20)?);
//!
//! let page = paginator
//!     .paginate(&source, "events", Some(Filter::eq("kind", "login")), &request, SortDirection::Asc)
//!     .await?;
//!
//! if let Some(next) = page.next_token {
//!     let request = PageRequest::from(CursorPage::new(20)?.after(next)?);
//!     // ...fetch the following page
//! }
//! # Ok::<(), pagelayer_core::error::PaginationError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as pagelayer_core;

pub mod error;
pub mod page;
pub mod paginate;
pub mod query;
pub mod request;
pub mod source;
pub mod token;
