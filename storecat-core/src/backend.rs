//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait is the seam between typed collections and a concrete
//! storage engine. Documents cross it as `(Uuid, Bson)` pairs; filters cross it as
//! a [`Query`]. Implementations must be `Send + Sync` and safe to share across tasks.
//!
//! ```ignore
//! use storecat_core::backend::StoreBackend;
//! use bson::{Uuid, Bson, doc};
//!
//! let id = Uuid::new();
//! backend.insert_documents(vec![(id, Bson::Document(doc! { "price": 12.5 }))], "products").await?;
//! let matched = backend.set_fields(id, doc! { "price": 15.0 }, "products").await?;
//! assert_eq!(matched, 1);
//! ```

use async_trait::async_trait;
use bson::{Bson, Uuid};
use std::fmt::Debug;

use crate::{error::DocumentStoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// None of the operations are transactional with respect to each other; any
/// consistency beyond a single call is left to the storage engine.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts new documents into a collection, creating the collection if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentAlreadyExists`](crate::error::DocumentStoreError::DocumentAlreadyExists)
    /// or a backend error when an ID is already taken.
    async fn insert_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> DocumentStoreResult<()>;

    /// Retrieves documents by ID. Missing IDs are omitted from the result.
    async fn get_documents(
        &self,
        ids: Vec<Uuid>,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Bson>>;

    /// Returns the documents matching `query.filter`, at most `query.limit` of them.
    ///
    /// An unknown collection yields an empty result, not an error.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Bson>>;

    /// Merges `fields` into the stored document with the given ID.
    ///
    /// Keys not present in `fields` are left untouched. Returns the number of
    /// documents matched (0 or 1); nothing is written when it is 0.
    async fn set_fields(
        &self,
        id: Uuid,
        fields: bson::Document,
        collection: &str,
    ) -> DocumentStoreResult<u64>;

    /// Deletes documents by ID and returns how many were actually removed.
    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> DocumentStoreResult<u64>;

    /// Creates an empty collection. Creating an existing collection is not an error.
    async fn create_collection(&self, name: &str) -> DocumentStoreResult<()>;

    /// Creates an ascending index on `field`, optionally enforcing uniqueness.
    ///
    /// Backends without index support treat this as a no-op.
    async fn add_index(
        &self,
        collection: &str,
        field: &str,
        unique: bool,
    ) -> DocumentStoreResult<()>;

    /// Releases connections and other resources held by the backend.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Builds a backend, typically performing connection setup.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
