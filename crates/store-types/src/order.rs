//! Order types for the storefront backend.
//!
//! This module defines the persisted order document, the raw submission
//! received from the storefront, and the status labels an order moves
//! through during fulfilment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single line item inside an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
	/// Display name of the product at the time of ordering.
	pub name: String,
	/// Number of units requested.
	pub quantity: u32,
	/// Catalog id of the product, when the storefront supplied one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_id: Option<String>,
}

/// A persisted customer purchase request.
///
/// Orders are created once, read many times, and mutated only through
/// status transitions. The document is stored verbatim in the `orders`
/// collection; wire names are camelCase to match the storefront clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier, assigned at creation. Immutable.
	pub id: String,
	pub customer_name: String,
	pub phone_number: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub whatsapp_number: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub landmark: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pincode: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order_message: Option<String>,
	/// Line items. Never empty for a persisted order.
	pub ordered_products: Vec<OrderedProduct>,
	/// Identity of the placing account, when the storefront was signed in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_email: Option<String>,
	/// Selected variant size, or empty when the product has no variants.
	#[serde(default)]
	pub size: String,
	/// Shipping charge applied to the order.
	pub shipping: f64,
	/// Current fulfilment status. Always one of the four enumerated values.
	pub order_status: OrderStatus,
	/// Server-assigned creation timestamp. Immutable.
	pub created_at: DateTime<Utc>,
	/// Set on every status change. Absent until the first transition.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

/// A raw order submission as received from the storefront.
///
/// Required fields default to empty values so that an incomplete body
/// still deserializes; the order validator rejects it with a proper
/// error instead of the framework's generic body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
	#[serde(default)]
	pub customer_name: String,
	#[serde(default)]
	pub phone_number: String,
	pub whatsapp_number: Option<String>,
	pub delivery_address: Option<String>,
	pub landmark: Option<String>,
	pub city: Option<String>,
	pub pincode: Option<String>,
	pub order_message: Option<String>,
	#[serde(default)]
	pub ordered_products: Vec<OrderedProduct>,
	pub user_id: Option<String>,
	pub user_email: Option<String>,
	pub size: Option<String>,
	pub shipping: Option<f64>,
}

/// Status of an order in the fulfilment workflow.
///
/// Wire values are the capitalized variant names, case-sensitive:
/// `"Placed"`, `"Packed"`, `"Shipped"`, `"Delivered"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
	/// Order has been received and stored.
	Placed,
	/// Order has been packed and is ready for dispatch.
	Packed,
	/// Order has been handed to the courier.
	Shipped,
	/// Order has reached the customer.
	Delivered,
}

impl OrderStatus {
	/// Returns every status in workflow order.
	pub fn all() -> [OrderStatus; 4] {
		[
			OrderStatus::Placed,
			OrderStatus::Packed,
			OrderStatus::Shipped,
			OrderStatus::Delivered,
		]
	}

	/// Returns the wire representation of this status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Placed => "Placed",
			OrderStatus::Packed => "Packed",
			OrderStatus::Shipped => "Shipped",
			OrderStatus::Delivered => "Delivered",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for OrderStatus {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Placed" => Ok(OrderStatus::Placed),
			"Packed" => Ok(OrderStatus::Packed),
			"Shipped" => Ok(OrderStatus::Shipped),
			"Delivered" => Ok(OrderStatus::Delivered),
			_ => Err(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_wire_values_are_capitalized() {
		for status in OrderStatus::all() {
			let json = serde_json::to_string(&status).unwrap();
			assert_eq!(json, format!("\"{}\"", status.as_str()));
		}
	}

	#[test]
	fn status_parse_is_case_sensitive() {
		assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
		assert!("shipped".parse::<OrderStatus>().is_err());
		assert!("SHIPPED".parse::<OrderStatus>().is_err());
		assert!("Cancelled".parse::<OrderStatus>().is_err());
	}

	#[test]
	fn submission_tolerates_missing_required_fields() {
		// An empty body must deserialize; rejection is the validator's job.
		let submission: OrderSubmission = serde_json::from_str("{}").unwrap();
		assert!(submission.customer_name.is_empty());
		assert!(submission.ordered_products.is_empty());
	}

	#[test]
	fn order_round_trips_with_camel_case_names() {
		let order = Order {
			id: "o1".into(),
			customer_name: "Asha".into(),
			phone_number: "9876543210".into(),
			whatsapp_number: None,
			delivery_address: Some("12 Temple St".into()),
			landmark: None,
			city: Some("Madurai".into()),
			pincode: None,
			order_message: None,
			ordered_products: vec![OrderedProduct {
				name: "Saree".into(),
				quantity: 1,
				product_id: None,
			}],
			user_id: Some("u1".into()),
			user_email: None,
			size: String::new(),
			shipping: 70.0,
			order_status: OrderStatus::Placed,
			created_at: Utc::now(),
			updated_at: None,
		};

		let value = serde_json::to_value(&order).unwrap();
		assert_eq!(value["customerName"], "Asha");
		assert_eq!(value["orderStatus"], "Placed");
		assert_eq!(value["orderedProducts"][0]["quantity"], 1);
		assert!(value.get("updatedAt").is_none());

		let back: Order = serde_json::from_value(value).unwrap();
		assert_eq!(back.ordered_products, order.ordered_products);
	}
}
