//! Document trait and BSON conversion helpers.

use bson::{Bson, Uuid, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// A value that can be stored in a named collection.
///
/// Every document carries a UUID used as its storage key, and names the
/// collection it lives in.
///
/// # Example
///
/// ```ignore
/// use storecat_core::document::Document;
/// use bson::Uuid;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Product {
///     pub id: Uuid,
///     pub name: String,
/// }
///
/// impl Document for Product {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "products"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns a reference to this document's unique identifier.
    fn id(&self) -> &Uuid;

    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;
}

/// BSON conversions, implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON value for storage.
    fn to_bson(&self) -> DocumentStoreResult<Bson>;

    /// Creates a document from a stored BSON value.
    fn from_bson(bson: Bson) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson(&self) -> DocumentStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}

/// Serializes a partial payload into the BSON document of fields to set.
///
/// Fields the payload skips during serialization (for example `None` values marked
/// `skip_serializing_if`) are absent from the result, so they are never written.
pub fn to_field_set<T: Serialize>(payload: &T) -> DocumentStoreResult<bson::Document> {
    match serialize_to_bson(payload)? {
        Bson::Document(fields) => Ok(fields),
        other => Err(DocumentStoreError::InvalidDocument(format!(
            "expected a document of fields, got {:?}",
            other.element_type()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Patch {
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    }

    #[test]
    fn field_set_omits_unset_fields() {
        let fields = to_field_set(&Patch { price: Some(9.5), name: None }).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_f64("price").unwrap(), 9.5);
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn field_set_rejects_non_documents() {
        let result = to_field_set(&42_i32);

        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
    }
}
