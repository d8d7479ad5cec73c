//! A product catalog over a thin JSON document store layer.
//!
//! This crate is the entry point of the storecat workspace. It provides:
//!
//! - **Products** ([`products`]) - the `Product` schemas and the [`ProductService`](products::ProductService)
//!   with create, get, price-range query, partial update and delete
//! - **Client** ([`client`]) - the single shared [`StoreClient`](client::StoreClient) and its lifecycle
//! - **Settings** ([`settings`]) - environment-driven configuration
//! - **Telemetry** ([`telemetry`]) - tracing subscriber setup
//!
//! It also re-exports the document layer from `storecat-core` and the available backends.
//!
//! # Quick Start
//!
//! ```ignore
//! use storecat::{prelude::*, client::StoreClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&LogSettings::from_env()?);
//!
//!     let client = StoreClient::in_memory();
//!     let products = client.products();
//!     products.init_indexes().await?;
//!
//!     let lamp = products
//!         .create(ProductIn {
//!             name: "Desk lamp".to_string(),
//!             quantity: 4,
//!             price: 19.9,
//!             status: true,
//!         })
//!         .await?;
//!
//!     // Only applied because both bounds are given.
//!     let affordable = products.query(Some(10.0), Some(20.0)).await?;
//!     assert_eq!(affordable, vec![lamp.clone()]);
//!
//!     products
//!         .update(lamp.id, ProductUpdate { price: Some(17.5), ..Default::default() })
//!         .await?;
//!     products.delete(lamp.id).await?;
//!
//!     drop(products);
//!     client.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - in-memory storage for development and testing
//! - [`mongodb`] - MongoDB storage (requires the `mongodb` feature)

pub mod client;
pub mod prelude;
pub mod products;
pub mod settings;
pub mod telemetry;

pub use storecat_core::{backend, collection, document, error, query, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend.
pub mod memory {
    pub use storecat_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use storecat_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
