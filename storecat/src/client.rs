//! The process-wide store client.
//!
//! A [`StoreClient`] is built once at startup, handed out by shared reference to
//! every request, and shut down explicitly when the process stops.
//!
//! ```ignore
//! use storecat::{client::StoreClient, prelude::*};
//!
//! let client = StoreClient::in_memory();
//! let products = client.products();
//! let lamp = products.create(ProductIn { /* ... */ }).await?;
//!
//! drop(products);
//! client.shutdown().await?;
//! ```

use std::sync::Arc;

use storecat_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    store::DocumentStore,
};
use storecat_memory::InMemoryStore;
use tracing::info;

use crate::products::ProductService;

/// Owns the shared [`DocumentStore`] for the lifetime of the process.
#[derive(Debug)]
pub struct StoreClient<B: StoreBackend> {
    store: Arc<DocumentStore<B>>,
}

impl<B: StoreBackend> StoreClient<B> {
    /// Wraps an already-built backend.
    pub fn new(backend: B) -> Self {
        Self { store: Arc::new(DocumentStore::new(backend)) }
    }

    /// Builds the backend (connecting if the backend needs to) and wraps it.
    pub async fn connect<T>(builder: T) -> DocumentStoreResult<Self>
    where
        T: StoreBackendBuilder<Backend = B>,
    {
        let backend = builder.build().await?;
        info!("document store connected");

        Ok(Self::new(backend))
    }

    /// Returns a shared handle to the store.
    pub fn store(&self) -> Arc<DocumentStore<B>> {
        Arc::clone(&self.store)
    }

    /// Returns a product service over the shared store.
    pub fn products(&self) -> ProductService<B> {
        ProductService::new(self.store())
    }

    /// Releases the backend.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentStoreError::Backend`] while services or store handles
    /// obtained from this client are still alive.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        let store = Arc::try_unwrap(self.store).map_err(|shared| {
            DocumentStoreError::Backend(format!(
                "cannot shut down: {} store handle(s) still in use",
                Arc::strong_count(&shared) - 1
            ))
        })?;

        store.shutdown().await?;
        info!("document store shut down");

        Ok(())
    }
}

impl StoreClient<InMemoryStore> {
    /// A client over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

#[cfg(feature = "mongodb")]
impl StoreClient<storecat_mongodb::MongoDbStore> {
    /// Connects to MongoDB using the configured URL and database name.
    pub async fn from_settings(
        settings: &crate::settings::DatabaseSettings,
    ) -> DocumentStoreResult<Self> {
        Self::connect(storecat_mongodb::MongoDbStore::builder(&settings.url, &settings.name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storecat_memory::InMemoryStoreBuilder;

    #[tokio::test]
    async fn shutdown_fails_while_handles_are_alive() {
        let client = StoreClient::connect(InMemoryStoreBuilder).await.unwrap();
        let held = client.store();

        let err = client.shutdown().await.unwrap_err();
        assert!(matches!(err, DocumentStoreError::Backend(msg) if msg.contains("1 store handle")));
        drop(held);
    }

    #[tokio::test]
    async fn shutdown_succeeds_once_handles_are_dropped() {
        let client = StoreClient::in_memory();
        let products = client.products();
        drop(products);

        client.shutdown().await.unwrap();
    }
}
