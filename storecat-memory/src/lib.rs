//! In-memory document storage backend for storecat.
//!
//! A thread-safe implementation of `StoreBackend` intended for development and
//! tests. Every clone of an [`InMemoryStore`] shares the same data.
//!
//! ```ignore
//! use storecat_core::{backend::StoreBackendBuilder, store::DocumentStore};
//! use storecat_memory::InMemoryStore;
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//! let products = store.typed_collection::<Product>();
//! ```

#[allow(unused_extern_crates)]
extern crate self as storecat_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
