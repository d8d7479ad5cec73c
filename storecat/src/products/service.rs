use std::sync::Arc;

use bson::Uuid;
use storecat_core::{
    backend::StoreBackend,
    collection::TypedCollection,
    document::{Document, to_field_set},
    query::{Expr, Filter, Query},
    store::DocumentStore,
};
use tracing::{debug, info, instrument};

use super::{
    error::{ProductError, ProductResult},
    model::{Product, ProductIn, ProductUpdate, StampedUpdate},
};

/// Maximum number of products returned by [`ProductService::query`].
pub const QUERY_FETCH_LIMIT: usize = 100;

/// Create, read, update and delete operations over the `products` collection.
///
/// The service holds a shared handle to the document store; cloning it is cheap.
/// Existence checks in [`update`](Self::update) and [`delete`](Self::delete) are
/// not atomic with the write that follows them.
#[derive(Debug)]
pub struct ProductService<B: StoreBackend> {
    store: Arc<DocumentStore<B>>,
}

impl<B: StoreBackend> Clone for ProductService<B> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<B: StoreBackend> ProductService<B> {
    pub fn new(store: Arc<DocumentStore<B>>) -> Self {
        Self { store }
    }

    fn products(&self) -> TypedCollection<'_, B, Product> {
        self.store.typed_collection::<Product>()
    }

    /// Creates the collection with a unique `id` index and a `price` index.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let collection = Product::collection_name();

        self.store.create_collection(collection).await?;
        self.store.add_index(collection, "id", true).await?;
        self.store.add_index(collection, "price", false).await?;

        info!(collection, "product indexes ready");
        Ok(())
    }

    #[instrument(skip(self, body), fields(product_name = %body.name))]
    pub async fn create(&self, body: ProductIn) -> ProductResult<Product> {
        let product = Product::new(body);

        self.products().insert(vec![product.clone()]).await?;

        info!(product_id = %product.id, "product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ProductResult<Product> {
        self.products()
            .find_one(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Lists up to [`QUERY_FETCH_LIMIT`] products.
    ///
    /// The price filter `min_price < price < max_price` applies only when both
    /// bounds are given; a single bound is ignored and every product matches.
    #[instrument(skip(self))]
    pub async fn query(
        &self,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> ProductResult<Vec<Product>> {
        let products = self
            .products()
            .query(
                Query::builder()
                    .maybe_filter(price_range(min_price, max_price))
                    .limit(QUERY_FETCH_LIMIT)
                    .build(),
            )
            .await?;

        debug!(count = products.len(), "products queried");
        Ok(products)
    }

    /// Merges the supplied fields into the product and refreshes `updated_at`.
    ///
    /// `updated_at` is written even when `body` carries no changes.
    #[instrument(skip(self, body))]
    pub async fn update(&self, id: Uuid, body: ProductUpdate) -> ProductResult<Product> {
        let fields = to_field_set(&StampedUpdate::now(&body))?;
        let matched = self.products().set_fields(id, fields).await?;

        if matched == 0 {
            return Err(ProductError::NotFound(id));
        }

        info!(product_id = %id, "product updated");
        self.get(id).await
    }

    /// Deletes the product, returning whether the store reported a removal.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        if self.products().find_one(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let deleted = self.products().delete(vec![id]).await?;

        info!(product_id = %id, deleted, "product deleted");
        Ok(deleted > 0)
    }
}

/// Builds the exclusive price range filter, or `None` unless both bounds are present.
fn price_range(min_price: Option<f64>, max_price: Option<f64>) -> Option<Expr> {
    match (min_price, max_price) {
        (Some(min), Some(max)) => Some(Filter::gt("price", min).and(Filter::lt("price", max))),
        _ => None,
    }
}
