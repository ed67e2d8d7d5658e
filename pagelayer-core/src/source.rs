//! The external document source collaborator.
//!
//! The pagination engine does not implement a database. It queries an
//! external store through the two primitives defined here, and everything
//! else — connection pooling, write concerns, query execution — belongs to
//! the source implementation.
//!
//! # Traits
//!
//! - [`DocumentSource`]: the find/count surface the engine delegates to
//! - [`DocumentSourceBuilder`]: factory trait for constructing sources
//!
//! Implementations must be thread-safe (`Send + Sync`) since a single
//! source is typically shared across concurrent paginate calls. The engine
//! performs no retries and defines no timeout of its own; whatever the
//! source's call contract provides is inherited transparently.

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::{
    error::SourceError,
    query::{Expr, FindQuery},
};

/// Abstract read interface over a collection-oriented document store.
#[async_trait]
pub trait DocumentSource: Send + Sync + Debug {
    /// Executes a query against a collection and returns the matching
    /// records in sort order.
    ///
    /// The query's filter is interpreted natively by the source; sort,
    /// skip, and limit are applied after filtering, in that order. A
    /// missing collection yields an empty batch, not an error.
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Bson>, SourceError>;

    /// Counts the records in a collection matching a filter.
    ///
    /// Counting a large collection can be expensive; the engine only calls
    /// this when a total was explicitly requested.
    async fn count(&self, collection: &str, filter: Option<Expr>) -> Result<u64, SourceError>;
}

#[async_trait]
impl<S> DocumentSource for &S
where
    S: DocumentSource,
{
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Bson>, SourceError> {
        (*self).find(collection, query).await
    }

    async fn count(&self, collection: &str, filter: Option<Expr>) -> Result<u64, SourceError> {
        (*self).count(collection, filter).await
    }
}

/// Factory trait for constructing document sources.
#[async_trait]
pub trait DocumentSourceBuilder {
    type Source: DocumentSource;

    async fn build(self) -> Result<Self::Source, SourceError>;
}
