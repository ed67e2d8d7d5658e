//! MongoDB document source for pagelayer.
//!
//! This crate implements the `DocumentSource` trait on top of the official
//! MongoDB driver. Filter expressions are translated into native operator
//! documents, and sort/skip/limit execute server-side, so pagination over
//! large collections stays cheap.
//!
//! # Quick Start
//!
//! ```ignore
//! use pagelayer::{Paginator, source::DocumentSourceBuilder};
//! use pagelayer_mongodb::MongoDbSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MongoDbSource::builder("mongodb://localhost:27017", "app")
//!         .build()
//!         .await?;
//!
//!     let paginator = Paginator::default();
//!     // paginate as with any other source
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as pagelayer_mongodb;

pub mod query;
pub mod source;

pub use source::{MongoDbSource, MongoDbSourceBuilder};
