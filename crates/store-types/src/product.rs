//! Catalog types for products and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price overrides for a specific product size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizeVariant {
	/// Numeric size label (e.g. bangle sizes like 2.4, 2.6).
	pub size: f64,
	pub original_price: f64,
	pub discounted_price: f64,
}

/// A catalog item, stored verbatim in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	pub id: String,
	pub name: String,
	pub description: String,
	pub original_price: f64,
	pub discounted_price: f64,
	pub category: String,
	/// Top-level product line (e.g. "bangles", "dresses").
	pub product_type: String,
	/// Public URL of the product image in object storage.
	pub image: String,
	#[serde(default)]
	pub size_variants: Vec<SizeVariant>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default)]
	pub note: String,
	pub created_at: DateTime<Utc>,
}

/// A raw size variant from the admin form; missing prices fall back to
/// the product-level prices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSizeVariant {
	pub size: f64,
	pub original_price: Option<f64>,
	pub discounted_price: Option<f64>,
}

/// A product submission from the admin UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub original_price: Option<f64>,
	pub discounted_price: Option<f64>,
	#[serde(default)]
	pub category: String,
	#[serde(default)]
	pub product_type: String,
	#[serde(default)]
	pub image: String,
	#[serde(default)]
	pub size_variants: Vec<NewSizeVariant>,
	pub label: Option<String>,
	pub note: Option<String>,
}

/// A named grouping of products within a product line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
	pub id: String,
	pub name: String,
	pub product_type: String,
}

/// A category submission from the admin UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub product_type: String,
}
