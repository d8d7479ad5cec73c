use bson::Uuid;
use storecat_core::error::DocumentStoreError;
use thiserror::Error;

/// Errors surfaced by [`ProductService`](super::ProductService).
///
/// Store failures are translated into these kinds so callers never match on
/// backend-specific errors.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with filter: {0}")]
    NotFound(Uuid),

    #[error("Product {0} already exists")]
    AlreadyExists(String),

    #[error("Invalid product data: {0}")]
    InvalidData(String),

    #[error("Product store unavailable: {0}")]
    Unavailable(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DocumentStoreError> for ProductError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::DocumentAlreadyExists(id, _) => ProductError::AlreadyExists(id),
            DocumentStoreError::Serialization(msg) | DocumentStoreError::InvalidDocument(msg) => {
                ProductError::InvalidData(msg)
            }
            DocumentStoreError::Initialization(msg) | DocumentStoreError::Backend(msg) => {
                ProductError::Unavailable(msg)
            }
        }
    }
}

/// Parses a textual product identifier, as received from an API layer.
pub fn parse_product_id(raw: &str) -> ProductResult<Uuid> {
    uuid::Uuid::parse_str(raw)
        .map(Uuid::from)
        .map_err(|e| ProductError::InvalidData(format!("invalid product id {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_identifier() {
        let id = Uuid::new();

        assert_eq!(
            ProductError::NotFound(id).to_string(),
            format!("Product not found with filter: {id}"),
        );
    }

    #[test]
    fn store_errors_are_translated() {
        let err: ProductError =
            DocumentStoreError::DocumentAlreadyExists("abc".into(), "products".into()).into();
        assert!(matches!(err, ProductError::AlreadyExists(id) if id == "abc"));

        let err: ProductError = DocumentStoreError::Backend("connection reset".into()).into();
        assert!(matches!(err, ProductError::Unavailable(_)));

        let err: ProductError = DocumentStoreError::Serialization("bad price".into()).into();
        assert!(matches!(err, ProductError::InvalidData(_)));
    }

    #[test]
    fn parses_and_rejects_identifiers() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";

        assert_eq!(parse_product_id(raw).unwrap().to_string(), raw);
        assert!(matches!(parse_product_id("not-a-uuid"), Err(ProductError::InvalidData(_))));
    }
}
