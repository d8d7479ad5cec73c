//! Convenient re-exports of the commonly used storecat types.
//!
//! ```ignore
//! use storecat::prelude::*;
//! ```

pub use storecat_core::{
    store::DocumentStore,
    document::{Document, DocumentExt},
    backend::{StoreBackend, StoreBackendBuilder},
    query::{Query, QueryBuilder, Expr, FieldOp, Filter},
    error::{DocumentStoreError, DocumentStoreResult},
};

pub use crate::{
    client::StoreClient,
    products::{Product, ProductError, ProductIn, ProductResult, ProductService, ProductUpdate},
    settings::{DatabaseSettings, FromEnv, LogSettings, Settings},
    telemetry::init_tracing,
};
