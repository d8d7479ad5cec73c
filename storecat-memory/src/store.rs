//! In-memory storage implementation.
//!
//! Documents are kept as BSON values in per-collection hash maps guarded by an
//! async-aware read-write lock.

use std::{collections::{HashMap, HashSet}, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Uuid, Bson};
use tracing::debug;

use storecat_core::{
    query::Query,
    error::{DocumentStoreError, DocumentStoreResult},
    backend::{StoreBackend, StoreBackendBuilder},
};

use crate::evaluator::DocumentEvaluator;

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;


/// Thread-safe in-memory document storage backend.
///
/// Clones share the same underlying data. Queries scan the whole collection and
/// return matches in hash-map order, which is unspecified.
///
/// # Example
///
/// ```ignore
/// use storecat_memory::InMemoryStore;
/// use storecat_core::backend::StoreBackend;
/// use bson::{Uuid, Bson, doc};
///
/// let store = InMemoryStore::new();
/// let id = Uuid::new();
/// store.insert_documents(vec![(id, Bson::Document(doc! { "price": 4.0 }))], "products").await?;
/// assert_eq!(store.get_documents(vec![id], "products").await?.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> (document id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        // Reject the whole batch before touching the map.
        let mut seen = HashSet::with_capacity(documents.len());
        for (id, _) in &documents {
            let key = id.to_string();

            if collection_map.contains_key(&key) || !seen.insert(key.clone()) {
                return Err(DocumentStoreError::DocumentAlreadyExists(key, collection.to_string()));
            }
        }

        for (id, doc) in documents {
            collection_map.insert(id.to_string(), doc);
        }

        Ok(())
    }

    async fn get_documents(&self, ids: Vec<Uuid>, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(
            ids.iter()
                .filter_map(|id| collection_map.get(&id.to_string()))
                .cloned()
                .collect()
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let matched = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(
                collection_map.values(),
                filter,
            ),
            None => collection_map
                .values()
                .cloned()
                .collect::<Vec<_>>(),
        };

        debug!(collection, matched = matched.len(), "evaluated in-memory query");

        Ok(
            matched
                .into_iter()
                .take(query.limit.unwrap_or(usize::MAX))
                .collect()
        )
    }

    async fn set_fields(&self, id: Uuid, fields: bson::Document, collection: &str) -> DocumentStoreResult<u64> {
        let mut store = self.store.write().await;
        let Some(doc) = store
            .get_mut(collection)
            .and_then(|col| col.get_mut(&id.to_string()))
        else {
            return Ok(0);
        };

        let target = doc
            .as_document_mut()
            .ok_or_else(|| DocumentStoreError::InvalidDocument(format!("{id} is not a document")))?;

        for (key, value) in fields {
            target.insert(key, value);
        }

        Ok(1)
    }

    async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> DocumentStoreResult<u64> {
        let mut store = self.store.write().await;
        let collection_map = match store.get_mut(collection) {
            Some(col) => col,
            None => return Ok(0),
        };

        Ok(
            ids.iter()
                .filter(|id| collection_map.remove(&id.to_string()).is_some())
                .count() as u64
        )
    }

    async fn create_collection(&self, name: &str) -> DocumentStoreResult<()> {
        self.store
            .write()
            .await
            .entry(name.to_string())
            .or_default();

        Ok(())
    }

    async fn add_index(&self, _collection: &str, _field: &str, _unique: bool) -> DocumentStoreResult<()> {
        // No indexing in memory; uniqueness of ids is enforced on insert.
        Ok(())
    }
}


/// Builder for [`InMemoryStore`]. Building never fails.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use storecat_core::query::Filter;

    const PRODUCTS: &str = "products";

    async fn seeded(prices: &[f64]) -> (InMemoryStore, Vec<Uuid>) {
        let store = InMemoryStore::new();
        let ids = prices.iter().map(|_| Uuid::new()).collect::<Vec<_>>();

        store
            .insert_documents(
                ids.iter()
                    .zip(prices)
                    .map(|(id, &price)| (*id, Bson::Document(doc! { "name": "item", "price": price })))
                    .collect(),
                PRODUCTS,
            )
            .await
            .unwrap();

        (store, ids)
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_without_partial_writes() {
        let (store, ids) = seeded(&[1.0]).await;
        let fresh = Uuid::new();

        let result = store
            .insert_documents(
                vec![
                    (fresh, Bson::Document(doc! { "price": 2.0 })),
                    (ids[0], Bson::Document(doc! { "price": 3.0 })),
                ],
                PRODUCTS,
            )
            .await;

        assert!(matches!(result, Err(DocumentStoreError::DocumentAlreadyExists(_, _))));
        assert_eq!(store.len(PRODUCTS).await, 1);
    }

    #[tokio::test]
    async fn repeated_id_within_a_batch_is_rejected() {
        let store = InMemoryStore::new();
        let id = Uuid::new();

        let result = store
            .insert_documents(
                vec![
                    (id, Bson::Document(doc! { "price": 1.0 })),
                    (id, Bson::Document(doc! { "price": 2.0 })),
                ],
                PRODUCTS,
            )
            .await;

        assert!(matches!(result, Err(DocumentStoreError::DocumentAlreadyExists(key, _)) if key == id.to_string()));
        assert_eq!(store.len(PRODUCTS).await, 0);
    }

    #[tokio::test]
    async fn get_omits_missing_ids() {
        let (store, ids) = seeded(&[1.0, 2.0]).await;

        let found = store
            .get_documents(vec![ids[0], Uuid::new()], PRODUCTS)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert!(store.get_documents(vec![ids[0]], "unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn query_filters_and_caps_results() {
        let (store, _) = seeded(&[5.0, 12.0, 15.0, 18.0, 25.0]).await;

        let in_range = store
            .query_documents(
                Query::builder()
                    .filter(Filter::gt("price", 10.0).and(Filter::lt("price", 20.0)))
                    .build(),
                PRODUCTS,
            )
            .await
            .unwrap();
        assert_eq!(in_range.len(), 3);

        let capped = store
            .query_documents(Query::builder().limit(2).build(), PRODUCTS)
            .await
            .unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn set_fields_merges_and_reports_matches() {
        let (store, ids) = seeded(&[1.0]).await;

        let matched = store
            .set_fields(ids[0], doc! { "price": 9.0 }, PRODUCTS)
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let doc = store.get_documents(vec![ids[0]], PRODUCTS).await.unwrap().remove(0);
        let doc = doc.as_document().unwrap();
        assert_eq!(doc.get_f64("price").unwrap(), 9.0);
        assert_eq!(doc.get_str("name").unwrap(), "item");

        let missed = store
            .set_fields(Uuid::new(), doc! { "price": 9.0 }, PRODUCTS)
            .await
            .unwrap();
        assert_eq!(missed, 0);
        assert_eq!(store.len(PRODUCTS).await, 1);
    }

    #[tokio::test]
    async fn delete_counts_removed_documents() {
        let (store, ids) = seeded(&[1.0, 2.0]).await;

        let removed = store
            .delete_documents(vec![ids[0], Uuid::new()], PRODUCTS)
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len(PRODUCTS).await, 1);
        assert_eq!(store.delete_documents(vec![ids[1]], "unknown").await.unwrap(), 0);
    }
}
