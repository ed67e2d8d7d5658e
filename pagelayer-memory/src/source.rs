//! In-memory document source implementation.
//!
//! Stores records as BSON values in per-collection vectors behind an
//! async-aware read-write lock. Useful for tests and for small embedded
//! datasets that don't warrant a database.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::Bson;
use mea::rwlock::RwLock;

use pagelayer_core::{
    error::SourceError,
    query::{Expr, FindQuery, SortDirection},
    source::{DocumentSource, DocumentSourceBuilder},
};

use crate::evaluator::{Comparable, RecordEvaluator};

type SourceMap = HashMap<String, Vec<Bson>>;

/// Thread-safe in-memory document source.
///
/// Implements [`DocumentSource`] over plain vectors of BSON documents,
/// evaluating filter expressions directly and sorting with the same
/// comparison semantics the filter uses.
///
/// # Thread Safety
///
/// `InMemorySource` is cloneable and uses an `Arc`-wrapped internal state,
/// allowing it to be safely shared across async tasks. Multiple clones of
/// the same instance share the same underlying data.
///
/// # Performance
///
/// Queries scan all records in a collection (no indexing). For small to
/// medium datasets this is typically acceptable; for larger datasets use
/// a persistent source.
///
/// # Example
///
/// ```ignore
/// use pagelayer_memory::InMemorySource;
/// use bson::{Bson, doc};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = InMemorySource::new();
///
///     source
///         .insert("users", vec![Bson::Document(doc! { "_id": 1, "name": "Alice" })])
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemorySource {
    /// The main storage map: collection_name -> records
    collections: Arc<RwLock<SourceMap>>,
}

impl InMemorySource {
    /// Creates a new empty in-memory source.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(SourceMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemorySource`.
    pub fn builder() -> InMemorySourceBuilder {
        InMemorySourceBuilder::default()
    }

    /// Appends records to a collection, creating it on first use.
    ///
    /// Records keep their insertion order; queries without a sort return
    /// them in that order.
    ///
    /// # Errors
    ///
    /// Rejects any record that is not a BSON document.
    pub async fn insert(
        &self,
        collection: &str,
        records: Vec<Bson>,
    ) -> Result<(), SourceError> {
        for record in &records {
            if record.as_document().is_none() {
                return Err(SourceError::new("record is not a document"));
            }
        }

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(records);

        Ok(())
    }

    /// Removes a collection and all its records.
    pub async fn drop_collection(&self, collection: &str) {
        self.collections.write().await.remove(collection);
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Bson>, SourceError> {
        let collections = self.collections.read().await;
        let records = match collections.get(collection) {
            Some(records) => records,
            None => return Ok(vec![]),
        };

        let mut matched = match &query.filter {
            Some(filter) => RecordEvaluator::filter_records(records.iter(), filter)?,
            None => records.clone(),
        };

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                // Non-document records and missing fields sort as Null.
                let left = a
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);
                let right = b
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);

                match sort.direction {
                    SortDirection::Asc => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
                    SortDirection::Desc => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
                }
            });
        }

        Ok(matched
            .into_iter()
            .skip(query.skip.unwrap_or(0) as usize)
            .take(query.limit.map(|l| l as usize).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, collection: &str, filter: Option<Expr>) -> Result<u64, SourceError> {
        let collections = self.collections.read().await;
        let records = match collections.get(collection) {
            Some(records) => records,
            None => return Ok(0),
        };

        match &filter {
            Some(filter) => {
                let mut matched = 0u64;

                for record in records {
                    if RecordEvaluator::new(record).evaluate(filter)? {
                        matched += 1;
                    }
                }

                Ok(matched)
            }
            None => Ok(records.len() as u64),
        }
    }
}

/// Builder for constructing [`InMemorySource`] instances.
///
/// Currently a no-op builder; kept for parity with sources that require
/// connection setup.
#[derive(Default)]
pub struct InMemorySourceBuilder;

#[async_trait]
impl DocumentSourceBuilder for InMemorySourceBuilder {
    type Source = InMemorySource;

    async fn build(self) -> Result<Self::Source, SourceError> {
        Ok(InMemorySource::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use pagelayer_core::query::Filter;

    fn users() -> Vec<Bson> {
        vec![
            Bson::Document(doc! { "_id": 1, "name": "alice", "age": 30 }),
            Bson::Document(doc! { "_id": 2, "name": "bob", "age": 25 }),
            Bson::Document(doc! { "_id": 3, "name": "carol", "age": 35 }),
        ]
    }

    #[tokio::test]
    async fn find_filters_and_sorts() {
        let source = InMemorySource::new();
        source.insert("users", users()).await.unwrap();

        let query = FindQuery::builder()
            .filter(Filter::gte("age", 30))
            .sort("age", SortDirection::Desc)
            .build();

        let found = source.find("users", query).await.unwrap();
        let names = found
            .iter()
            .map(|r| r.as_document().unwrap().get_str("name").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[tokio::test]
    async fn find_applies_skip_and_limit_after_sort() {
        let source = InMemorySource::new();
        source.insert("users", users()).await.unwrap();

        let query = FindQuery::builder()
            .sort("_id", SortDirection::Asc)
            .skip(1)
            .limit(1)
            .build();

        let found = source.find("users", query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_document().unwrap().get_i32("_id").unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_collection_is_empty_not_an_error() {
        let source = InMemorySource::new();

        let found = source.find("nope", FindQuery::default()).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(source.count("nope", None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn count_respects_filter() {
        let source = InMemorySource::new();
        source.insert("users", users()).await.unwrap();

        assert_eq!(source.count("users", None).await.unwrap(), 3);
        assert_eq!(
            source
                .count("users", Some(Filter::lt("age", 31)))
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn insert_rejects_non_documents() {
        let source = InMemorySource::new();
        let err = source
            .insert("users", vec![Bson::Int32(7)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a document"));
    }
}
