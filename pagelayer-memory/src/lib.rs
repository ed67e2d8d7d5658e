//! In-memory document source for pagelayer.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `DocumentSource` trait. It uses async-aware read-write locks for
//! concurrent access and is ideal for development, testing, and small
//! embedded datasets.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Type-erased storage** - Stores records as BSON for flexibility
//! - **Full query support** - Filtering, sorting, skip and limit
//!
//! # Quick Start
//!
//! ```ignore
//! use pagelayer::{Paginator, memory::InMemorySource};
//! use pagelayer::request::{CursorPage, PageRequest};
//! use pagelayer::query::SortDirection;
//! use bson::{Bson, doc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = InMemorySource::new();
//!     source
//!         .insert("events", vec![Bson::Document(doc! { "_id": 1, "kind": "login" })])
//!         .await?;
//!
//!     let paginator = Paginator::default();
//!     let request = PageRequest::from(CursorPage::new(20)?);
//!     let page = paginator
//!         .paginate(&source, "events", None, &request, SortDirection::Asc)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as pagelayer_memory;

pub mod evaluator;
pub mod source;

pub use source::{InMemorySource, InMemorySourceBuilder};
