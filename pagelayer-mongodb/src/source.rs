//! MongoDB-backed document source implementation.

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};

use pagelayer_core::{
    error::SourceError,
    query::{Expr, FindQuery, QueryVisitor, SortDirection},
    source::{DocumentSource, DocumentSourceBuilder},
};

use crate::query::MongoQueryTranslator;

/// Document source backed by a MongoDB database.
///
/// Filter expressions translate to native operator documents; sort, skip,
/// and limit map onto the driver's find options, so the database does all
/// windowing work server-side.
#[derive(Debug)]
pub struct MongoDbSource {
    client: Client,
    database: String,
}

impl MongoDbSource {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbSourceBuilder {
        MongoDbSourceBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn translate_filter(filter: Option<&Expr>) -> Result<Document, SourceError> {
        match filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr),
            None => Ok(doc! {}),
        }
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentSource for MongoDbSource {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Bson>, SourceError> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(limit as i64);
        }
        if let Some(skip) = query.skip {
            options.skip = Some(skip);
        }
        if let Some(sort) = &query.sort {
            options.sort = Some(doc! {
                sort.field.clone(): match sort.direction {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                }
            })
        }

        Ok(self
            .get_collection(collection)
            .find(Self::translate_filter(query.filter.as_ref())?)
            .with_options(options)
            .await
            .map_err(|e| SourceError::new(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?
            .into_iter()
            .map(Bson::Document)
            .collect())
    }

    async fn count(&self, collection: &str, filter: Option<Expr>) -> Result<u64, SourceError> {
        self.get_collection(collection)
            .count_documents(Self::translate_filter(filter.as_ref())?)
            .await
            .map_err(|e| SourceError::new(e.to_string()))
    }
}

/// Builder that parses a connection string and constructs a
/// [`MongoDbSource`].
pub struct MongoDbSourceBuilder {
    dsn: String,
    database: String,
}

impl MongoDbSourceBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl DocumentSourceBuilder for MongoDbSourceBuilder {
    type Source = MongoDbSource;

    async fn build(self) -> Result<Self::Source, SourceError> {
        Ok(MongoDbSource::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| SourceError::new(e.to_string()))?,
            )
            .map_err(|e| SourceError::new(e.to_string()))?,
            self.database,
        ))
    }
}
