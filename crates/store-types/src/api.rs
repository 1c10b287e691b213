//! API types for the storefront HTTP API.
//!
//! This module defines the response envelopes and the boundary error type
//! used by every endpoint. All failures are converted to an `ApiError` at
//! the request boundary and rendered as `{"success": false, "error": ...}`
//! with a matching HTTP status; nothing propagates as an unhandled fault.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Category, OrderStatus, Product};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub success: bool,
	/// Human-readable description. Backend error text is passed through
	/// unmodified, so storage failures surface their own message.
	pub error: String,
}

/// Structured API error with its HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Missing or malformed input (400).
	BadRequest(String),
	/// Caller identity is not on the admin allowlist (403).
	Forbidden(String),
	/// Referenced record is absent (404).
	NotFound(String),
	/// Underlying storage operation failed (500).
	InternalServerError(String),
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest(_) => 400,
			ApiError::Forbidden(_) => 403,
			ApiError::NotFound(_) => 404,
			ApiError::InternalServerError(_) => 500,
		}
	}

	/// Convert to the wire error body.
	pub fn to_error_response(&self) -> ErrorResponse {
		let message = match self {
			ApiError::BadRequest(m)
			| ApiError::Forbidden(m)
			| ApiError::NotFound(m)
			| ApiError::InternalServerError(m) => m.clone(),
		};
		ErrorResponse {
			success: false,
			error: message,
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest(m) => write!(f, "Bad Request: {}", m),
			ApiError::Forbidden(m) => write!(f, "Forbidden: {}", m),
			ApiError::NotFound(m) => write!(f, "Not Found: {}", m),
			ApiError::InternalServerError(m) => write!(f, "Internal Server Error: {}", m),
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_error_response())).into_response()
	}
}

/// Response for a successful order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
	pub success: bool,
	pub message: String,
	pub order_id: String,
}

/// Request body for a status update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
	#[serde(default)]
	pub order_id: String,
	#[serde(default)]
	pub order_status: String,
}

/// Response for a successful status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
	pub success: bool,
	pub message: String,
	pub order_id: String,
	pub order_status: OrderStatus,
}

/// Response naming the most recent order for a phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestOrderResponse {
	pub success: bool,
	pub id: String,
}

/// Response listing the full product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
	pub success: bool,
	pub products: Vec<Product>,
	pub count: usize,
}

/// Response carrying a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
	pub success: bool,
	pub product: Product,
}

/// Response for a successful product creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
	pub success: bool,
	pub message: String,
	pub product_id: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
	pub success: bool,
	pub message: String,
}

/// Response listing categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
	pub success: bool,
	pub categories: Vec<Category>,
}

/// Response for a successful category creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreatedResponse {
	pub success: bool,
	pub message: String,
	pub category_id: String,
}
