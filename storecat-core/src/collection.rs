//! Typed access to a single collection.
//!
//! A [`TypedCollection`] borrows the backend from a
//! [`DocumentStore`](crate::store::DocumentStore) and converts documents to and from
//! BSON on every call.
//!
//! ```ignore
//! let products = store.typed_collection::<Product>();
//! products.insert(vec![product.clone()]).await?;
//! let found = products.find_one(product.id).await?;
//! ```

use bson::{Bson, Uuid};
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    document::{Document, DocumentExt},
    error::DocumentStoreResult,
    query::Query,
};

#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, D: Document> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<D>,
}

impl<'a, B: StoreBackend, D: Document> TypedCollection<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts new documents.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails or an ID is already present.
    pub async fn insert(&self, documents: Vec<D>) -> DocumentStoreResult<()> {
        self.backend
            .insert_documents(
                documents
                    .iter()
                    .map(|d| d.to_bson().map(|b| (*d.id(), b)))
                    .collect::<DocumentStoreResult<Vec<(Uuid, Bson)>>>()?,
                self.name(),
            )
            .await
    }

    /// Retrieves the document with the given ID, if any.
    pub async fn find_one(&self, id: impl Into<Uuid>) -> DocumentStoreResult<Option<D>> {
        Ok(self
            .backend
            .get_documents(vec![id.into()], self.name())
            .await?
            .into_iter()
            .next()
            .map(D::from_bson)
            .transpose()?)
    }

    /// Runs a query and deserializes every match.
    pub async fn query(&self, query: Query) -> DocumentStoreResult<Vec<D>> {
        self.backend
            .query_documents(query, self.name())
            .await?
            .into_iter()
            .map(D::from_bson)
            .collect()
    }

    /// Merges `fields` into the document with the given ID and returns the matched count.
    pub async fn set_fields(
        &self,
        id: impl Into<Uuid>,
        fields: bson::Document,
    ) -> DocumentStoreResult<u64> {
        self.backend
            .set_fields(id.into(), fields, self.name())
            .await
    }

    /// Deletes documents by ID and returns how many were removed.
    pub async fn delete<U>(&self, ids: Vec<U>) -> DocumentStoreResult<u64>
    where
        U: Into<Uuid> + Send + Sync + 'static,
    {
        self.backend
            .delete_documents(
                ids.into_iter()
                    .map(Into::into)
                    .collect(),
                self.name(),
            )
            .await
    }
}
