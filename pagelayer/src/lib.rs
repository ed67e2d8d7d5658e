//! Main pagelayer crate providing a unified pagination interface over
//! document stores.
//!
//! This crate is the primary entry point for users of the pagelayer
//! framework. It re-exports the core types and functionality from the
//! sub-crates and provides convenient access to the available document
//! sources.
//!
//! # Features
//!
//! - **Three pagination strategies** - Offset, cursor, and time-ordered paging over one engine
//! - **Opaque resume tokens** - Self-describing tokens that survive round trips through clients
//! - **Multiple sources** - In-memory and MongoDB sources with an extensible trait system
//! - **Flexible querying** - Composable filter expressions applied before pagination
//!
//! # Quick Start
//!
//! ```ignore
//! use pagelayer::{prelude::*, memory::InMemorySource};
//! use bson::{Bson, doc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = InMemorySource::new();
//!     source
//!         .insert(
//!             "events",
//!             (1..=10)
//!                 .map(|id| Bson::Document(doc! { "_id": id, "kind": "login" }))
//!                 .collect(),
//!         )
//!         .await?;
//!
//!     let paginator = Paginator::default();
//!     let request = PageRequest::from(CursorPage::new(3)?);
//!
//!     let page = paginator
//!         .paginate(&source, "events", None, &request, SortDirection::Asc)
//!         .await?;
//!     assert_eq!(page.items.len(), 3);
//!
//!     if let Some(next) = page.next_token {
//!         let request = PageRequest::from(CursorPage::new(3)?.after(next)?);
//!         let page = paginator
//!             .paginate(&source, "events", None, &request, SortDirection::Asc)
//!             .await?;
//!         // the next three records, no overlap
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Sources
//!
//! - [`memory`] - Fast in-memory source for development and testing
//! - [`mongodb`] - Persistent MongoDB source (requires `mongodb` feature)

pub mod prelude;

pub use pagelayer_core::{error, page, paginate, query, request, source, token};

pub use pagelayer_core::{
    page::Page,
    paginate::Paginator,
    request::{CursorPage, OffsetPage, PageRequest, PaginatorConfig, TimePage},
};

// Re-export BSON types for convenience
pub use bson;

/// In-memory document source implementations.
pub mod memory {
    pub use pagelayer_memory::{InMemorySource, InMemorySourceBuilder};
}

/// MongoDB document source implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use pagelayer_mongodb::{MongoDbSource, MongoDbSourceBuilder};
}
