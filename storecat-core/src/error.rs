//! Error types and result types for document store operations.
//!
//! Every backend reports failures through [`DocumentStoreError`]; callers that sit
//! above the store (such as the product service) translate it into their own error kinds.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Errors raised while talking to a document store backend.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// A document could not be converted to or from BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The backend could not be constructed or connected.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A document with the given ID already exists.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// The stored value is not a BSON document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
