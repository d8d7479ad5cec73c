//! The product catalog: schemas, errors and the [`ProductService`].

pub mod error;
pub mod model;
pub mod service;

pub use error::{ProductError, ProductResult, parse_product_id};
pub use model::{Product, ProductIn, ProductUpdate};
pub use service::{ProductService, QUERY_FETCH_LIMIT};
