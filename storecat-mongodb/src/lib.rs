//! MongoDB backend for storecat.
//!
//! Enable it through the `mongodb` feature of the `storecat` crate:
//!
//! ```toml
//! [dependencies]
//! storecat = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! Filters are translated into native MongoDB query documents, partial updates
//! become `$set` operations, and indexes map onto MongoDB index models.
//!
//! ```ignore
//! use storecat_core::backend::StoreBackendBuilder;
//! use storecat_mongodb::MongoDbStore;
//!
//! let backend = MongoDbStore::builder("mongodb://localhost:27017", "store")
//!     .build()
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as storecat_mongodb;

pub mod store;
pub mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
