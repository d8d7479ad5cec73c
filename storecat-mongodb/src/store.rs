use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, Bson, Uuid, doc};
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    error::{ErrorKind, InsertManyError, WriteFailure},
    options::{ClientOptions, FindOptions, IndexOptions},
};
use tracing::{debug, info};
use storecat_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    query::Query,
};

use crate::query::MongoQueryTranslator;


/// MongoDB-backed document store.
///
/// Each document is stored with its UUID as `_id`; the `_id` key is stripped again
/// when documents are read back.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn prepare_document(&self, id: &Uuid, document: &Bson) -> DocumentStoreResult<Document> {
        let mut prepared = document
            .as_document()
            .cloned()
            .ok_or_else(|| DocumentStoreError::InvalidDocument(format!("{id} is not a document")))?;

        prepared.insert("_id", *id);

        Ok(prepared)
    }

    fn restore_document(&self, mut document: Document) -> Bson {
        document.remove("_id");

        Bson::Document(document)
    }
}

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn backend_error(err: mongodb::error::Error) -> DocumentStoreError {
    DocumentStoreError::Backend(err.to_string())
}

/// MongoDB reads a negative limit as a single-batch request, so oversized limits saturate.
fn find_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Maps an `insert_many` failure, reporting duplicate keys as already existing documents.
fn insert_error(err: mongodb::error::Error, documents: &[(Uuid, Bson)], collection: &str) -> DocumentStoreError {
    let duplicate_index = match err.kind.as_ref() {
        ErrorKind::InsertMany(InsertManyError { write_errors: Some(errors), .. }) => errors
            .iter()
            .find(|e| e.code == DUPLICATE_KEY)
            .map(|e| e.index),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => Some(0),
        _ => None,
    };

    match duplicate_index {
        Some(index) => {
            let id = documents
                .get(index)
                .or_else(|| documents.first())
                .map_or_else(String::new, |(id, _)| id.to_string());

            DocumentStoreError::DocumentAlreadyExists(id, collection.to_string())
        }
        None => backend_error(err),
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> DocumentStoreResult<()> {
        self.get_collection(collection)
            .insert_many(
                documents
                    .iter()
                    .map(|(id, doc)| self.prepare_document(id, doc))
                    .collect::<DocumentStoreResult<Vec<Document>>>()?,
            )
            .await
            .map_err(|err| insert_error(err, &documents, collection))?;

        Ok(())
    }

    async fn get_documents(&self, ids: Vec<Uuid>, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        Ok(
            self.get_collection(collection)
                .find(doc! { "_id": { "$in": ids } })
                .await
                .map_err(backend_error)?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(backend_error)?
                .into_iter()
                .map(|doc| self.restore_document(doc))
                .collect()
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(find_limit(limit));
        }

        let filter = MongoQueryTranslator::translate(query.filter.as_ref())?;
        debug!(collection, %filter, "running mongodb find");

        Ok(
            self.get_collection(collection)
                .find(filter)
                .with_options(options)
                .await
                .map_err(backend_error)?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(backend_error)?
                .into_iter()
                .map(|doc| self.restore_document(doc))
                .collect()
        )
    }

    async fn set_fields(&self, id: Uuid, fields: Document, collection: &str) -> DocumentStoreResult<u64> {
        Ok(
            self.get_collection(collection)
                .update_one(
                    doc! { "_id": id },
                    doc! { "$set": fields },
                )
                .await
                .map_err(backend_error)?
                .matched_count
        )
    }

    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> DocumentStoreResult<u64> {
        Ok(
            self.get_collection(collection)
                .delete_many(doc! { "_id": { "$in": ids } })
                .await
                .map_err(backend_error)?
                .deleted_count
        )
    }

    async fn create_collection(&self, name: &str) -> DocumentStoreResult<()> {
        let database = self.client.database(&self.database);
        let existing = database
            .list_collection_names()
            .await
            .map_err(backend_error)?;

        if existing.iter().any(|existing| existing == name) {
            return Ok(());
        }

        database
            .create_collection(name)
            .await
            .map_err(backend_error)?;

        Ok(())
    }

    async fn add_index(&self, collection: &str, field: &str, unique: bool) -> DocumentStoreResult<()> {
        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(
                    IndexOptions::builder()
                    .unique(unique)
                    .build()
                )
                .build()
            )
            .await
            .map_err(backend_error)?;

        Ok(())
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await;
        info!(database = %self.database, "mongodb client shut down");

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;
        let client = Client::with_options(options)
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        info!(database = %self.database, "mongodb client created");

        Ok(MongoDbStore::new(client, self.database))
    }
}
