//! Product records and the response envelope
//!
//! Records are deserialized leniently: missing, `null` or wrongly typed
//! fields become defaults and show up as blank cells instead of failing the
//! whole load. Only the envelope shape is enforced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog record returned by the products API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub price: f64,
    #[serde(deserialize_with = "lenient")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient")]
    pub brand: String,
    #[serde(deserialize_with = "lenient")]
    pub category: String,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: String,
    #[serde(deserialize_with = "lenient")]
    pub discount_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub stock: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub images: Vec<String>,
}

/// Any value that doesn't fit the field (`null`, wrong type, out of range)
/// reads as the field's default
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Top-level JSON object wrapping the product array
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
}

/// A successfully loaded data set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Size of the remote catalog, when the API reports it
    pub total: Option<u64>,
    /// Offset this page of the catalog started at
    pub skip: u64,
}

impl From<Envelope> for Catalog {
    fn from(envelope: Envelope) -> Self {
        Self {
            products: envelope.products,
            total: envelope.total,
            skip: envelope.skip.unwrap_or(0),
        }
    }
}
