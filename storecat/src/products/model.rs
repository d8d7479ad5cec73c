use bson::Uuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storecat_core::document::Document;

/// A catalog product as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned at creation and never changed.
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    /// Whether the product is listed.
    pub status: bool,
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` until the first update.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a new product with a fresh identifier from a create payload.
    pub fn new(input: ProductIn) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new(),
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Product {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "products"
    }
}

/// Payload for creating a product. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductIn {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub status: bool,
}

/// Partial update payload. Fields left as `None` are not written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

/// The fields written by an update: the caller's changes plus a fresh `updated_at`.
#[derive(Debug, Serialize)]
pub(crate) struct StampedUpdate<'a> {
    #[serde(flatten)]
    pub changes: &'a ProductUpdate,
    pub updated_at: DateTime<Utc>,
}

impl<'a> StampedUpdate<'a> {
    pub(crate) fn now(changes: &'a ProductUpdate) -> Self {
        Self { changes, updated_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storecat_core::document::{DocumentExt, to_field_set};

    fn lamp() -> ProductIn {
        ProductIn {
            name: "Desk lamp".to_string(),
            quantity: 4,
            price: 19.9,
            status: true,
        }
    }

    #[test]
    fn new_product_starts_with_matching_timestamps() {
        let product = Product::new(lamp());

        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.name, "Desk lamp");
        assert_ne!(Product::new(lamp()).id, product.id);
    }

    #[test]
    fn product_survives_bson_conversion() {
        let product = Product::new(lamp());

        assert_eq!(Product::from_bson(product.to_bson().unwrap()).unwrap(), product);
    }

    #[test]
    fn stamped_update_writes_only_supplied_fields() {
        let changes = ProductUpdate { price: Some(99.0), ..Default::default() };
        let fields = to_field_set(&StampedUpdate::now(&changes)).unwrap();

        let mut keys = fields.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort_unstable();
        assert_eq!(keys, ["price", "updated_at"]);
    }

    #[test]
    fn empty_update_still_touches_updated_at() {
        let changes = ProductUpdate::default();
        let fields = to_field_set(&StampedUpdate::now(&changes)).unwrap();

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("updated_at"));
    }
}
