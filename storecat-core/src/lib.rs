//! Core building blocks of the storecat document layer.
//!
//! - **Documents** ([`document`]) - the [`Document`](document::Document) trait and BSON conversion
//! - **Backends** ([`backend`]) - the async [`StoreBackend`](backend::StoreBackend) seam
//! - **Queries** ([`query`]) - backend-neutral filter expressions and the visitor that interprets them
//! - **Collections** ([`collection`]) - typed access to a named collection
//! - **Store** ([`store`]) - the [`DocumentStore`](store::DocumentStore) that owns a backend
//! - **Errors** ([`error`]) - [`DocumentStoreError`](error::DocumentStoreError) and its result alias

#[allow(unused_extern_crates)]
extern crate self as storecat_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
