//! Submission validation for order intake.
//!
//! The validator is a pure check: it either rejects a raw submission or
//! produces a normalized creation record with defaults applied. It never
//! touches storage, so a rejected submission leaves no trace.

use crate::OrderError;
use store_types::{OrderSubmission, OrderedProduct};

/// A normalized order-creation record.
///
/// Everything the repository needs to persist a new order except the
/// server-assigned fields (id, status, creation timestamp).
#[derive(Debug, Clone)]
pub struct OrderDraft {
	pub customer_name: String,
	pub phone_number: String,
	pub whatsapp_number: Option<String>,
	pub delivery_address: Option<String>,
	pub landmark: Option<String>,
	pub city: Option<String>,
	pub pincode: Option<String>,
	pub order_message: Option<String>,
	pub ordered_products: Vec<OrderedProduct>,
	pub user_id: Option<String>,
	pub user_email: Option<String>,
	pub size: String,
	pub shipping: f64,
}

/// Checks raw order submissions and applies intake defaults.
#[derive(Debug, Clone)]
pub struct OrderValidator {
	default_shipping: f64,
}

impl OrderValidator {
	/// Creates a validator with the configured shipping default.
	pub fn new(default_shipping: f64) -> Self {
		Self { default_shipping }
	}

	/// Validates a submission and produces the normalized creation record.
	///
	/// Rejects when the customer name is empty or missing, the phone
	/// number is empty or missing, or the product list has zero elements.
	/// Optional fields pass through unchanged; an omitted shipping charge
	/// takes the configured default and an omitted size becomes empty.
	pub fn validate(&self, submission: OrderSubmission) -> Result<OrderDraft, OrderError> {
		if submission.customer_name.is_empty()
			|| submission.phone_number.is_empty()
			|| submission.ordered_products.is_empty()
		{
			return Err(OrderError::Validation("Missing required fields".into()));
		}

		Ok(OrderDraft {
			customer_name: submission.customer_name,
			phone_number: submission.phone_number,
			whatsapp_number: submission.whatsapp_number,
			delivery_address: submission.delivery_address,
			landmark: submission.landmark,
			city: submission.city,
			pincode: submission.pincode,
			order_message: submission.order_message,
			ordered_products: submission.ordered_products,
			user_id: submission.user_id,
			user_email: submission.user_email,
			size: submission.size.unwrap_or_default(),
			shipping: submission.shipping.unwrap_or(self.default_shipping),
		})
	}
}
