//! Product entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage-assigned product identifier
pub type ProductId = i64;

/// Free-form product attributes (name, price, ...)
pub type Attributes = Map<String, Value>;

/// Keys owned by the catalog that never live inside [`Attributes`]
pub const RESERVED_KEYS: &[&str] = &["id", "available", "createdAt", "updatedAt"];

/// A catalog product
///
/// Attributes are flattened next to the catalog-owned fields, so a product
/// serializes as `{"id":1,"name":"Chair","price":10,"available":true,...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    #[serde(flatten)]
    pub attributes: Attributes,

    /// `false` once the product has been removed
    pub available: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Attribute lookup by key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Drop catalog-owned keys from a caller payload
pub fn strip_reserved(mut attributes: Attributes) -> Attributes {
    for key in RESERVED_KEYS {
        attributes.remove(*key);
    }
    attributes
}

/// Interpret a JSON value as an attribute payload
///
/// Returns `None` unless the value is a JSON object.
pub fn attributes_from_value(value: Value) -> Option<Attributes> {
    match value {
        Value::Object(map) => Some(strip_reserved(map)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chair() -> Product {
        let now = Utc::now();
        let Value::Object(attributes) = json!({"name": "Chair", "price": 10}) else {
            unreachable!()
        };
        Product {
            id: 1,
            attributes,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_serializes_flat() {
        let json = serde_json::to_value(chair()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Chair");
        assert_eq!(json["price"], 10);
        assert_eq!(json["available"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn test_product_deserializes_flat() {
        let product: Product = serde_json::from_value(serde_json::to_value(chair()).unwrap()).unwrap();
        assert_eq!(product.attribute("name"), Some(&json!("Chair")));
        assert_eq!(product.attributes.len(), 2);
    }

    #[test]
    fn test_strip_reserved() {
        let value = json!({"id": 99, "available": false, "name": "Chair", "updatedAt": "x"});
        let attributes = attributes_from_value(value).unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["name"], "Chair");
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(attributes_from_value(json!([1, 2])).is_none());
        assert!(attributes_from_value(json!("Chair")).is_none());
        assert!(attributes_from_value(Value::Null).is_none());
    }
}
