//! Order endpoints for the storefront API.
//!
//! Request handling stops at validation and error mapping; the actual
//! semantics live in the order repository. Every failure is converted to
//! an [`ApiError`] here so the response body and status always match the
//! error taxonomy.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use store_order::{workflow, OrderError, OrderFilter, OrderListing};
use store_types::{
	ApiError, CreateOrderResponse, LatestOrderResponse, OrderSubmission, UpdateStatusRequest,
	UpdateStatusResponse,
};
use tracing::warn;

use crate::server::AppState;

/// Header naming the caller for the admin allowlist check.
const ADMIN_EMAIL_HEADER: &str = "x-admin-email";

/// Query parameters accepted by the order listing.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
	#[serde(rename = "userId")]
	user_id: Option<String>,
	#[serde(rename = "orderId")]
	order_id: Option<String>,
}

/// Handles POST /api/orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	Json(submission): Json<OrderSubmission>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
	let draft = state.validator.validate(submission).map_err(map_order_error)?;

	match state.orders.create(draft).await {
		Ok(order) => Ok(Json(CreateOrderResponse {
			success: true,
			message: "Order created successfully".into(),
			order_id: order.id,
		})),
		Err(e) => {
			warn!("Order creation failed: {}", e);
			Err(ApiError::InternalServerError("Failed to create order".into()))
		},
	}
}

/// Handles GET /api/orders requests.
///
/// Without parameters the body is the full order array; `userId` narrows
/// it to one user's orders; `orderId` resolves to a single bare order
/// object or a 404.
pub async fn list_orders(
	State(state): State<AppState>,
	Query(query): Query<ListOrdersQuery>,
) -> Result<Response, ApiError> {
	let filter = OrderFilter {
		user_id: query.user_id,
		order_id: query.order_id,
	};

	match state.orders.list(filter).await {
		Ok(OrderListing::Many(orders)) => Ok(Json(orders).into_response()),
		Ok(OrderListing::Single(order)) => Ok(Json(order).into_response()),
		Err(OrderError::NotFound) => Err(ApiError::NotFound("Order not found".into())),
		Err(e) => {
			warn!("Order listing failed: {}", e);
			Err(ApiError::InternalServerError("Failed to fetch orders".into()))
		},
	}
}

/// Handles PATCH /api/orders/update-status requests.
///
/// When the admin allowlist is configured, the caller must identify
/// itself via the `x-admin-email` header with a listed address.
pub async fn update_status(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
	if state.admin.is_enabled() {
		let caller = headers
			.get(ADMIN_EMAIL_HEADER)
			.and_then(|v| v.to_str().ok())
			.unwrap_or_default();
		if !state.admin.is_admin(caller) {
			return Err(ApiError::Forbidden(
				"Not authorized to update order status".into(),
			));
		}
	}

	if request.order_id.is_empty() || request.order_status.is_empty() {
		return Err(ApiError::BadRequest("Missing orderId or orderStatus".into()));
	}

	// Reject unknown labels before touching storage so a failed update
	// never changes state
	let new_status = workflow::parse_status(&request.order_status)
		.map_err(|_| ApiError::BadRequest("Invalid order status".into()))?;

	match state.orders.update_status(&request.order_id, new_status).await {
		Ok(order) => Ok(Json(UpdateStatusResponse {
			success: true,
			message: "Order status updated successfully".into(),
			order_id: order.id,
			order_status: order.order_status,
		})),
		Err(e) => {
			warn!("Status update failed: {}", e);
			Err(map_order_error(e))
		},
	}
}

/// Handles GET /api/orders/latest/{phone_number} requests.
///
/// Returns only the id of the most recent order for the phone number.
pub async fn latest_order_by_phone(
	State(state): State<AppState>,
	Path(phone_number): Path<String>,
) -> Result<Json<LatestOrderResponse>, ApiError> {
	match state.orders.latest_by_phone(&phone_number).await {
		Ok(order) => Ok(Json(LatestOrderResponse {
			success: true,
			id: order.id,
		})),
		Err(OrderError::NotFound) => Err(ApiError::NotFound("No orders found".into())),
		Err(OrderError::Validation(m)) => Err(ApiError::BadRequest(m)),
		Err(e) => {
			warn!("Latest-order lookup failed: {}", e);
			Err(ApiError::InternalServerError("Failed to fetch order".into()))
		},
	}
}

/// Maps repository errors onto the HTTP error taxonomy.
///
/// Storage failures pass their message through to the body; clients show
/// it as-is.
fn map_order_error(e: OrderError) -> ApiError {
	match e {
		OrderError::Validation(m) => ApiError::BadRequest(m),
		OrderError::NotFound => ApiError::NotFound("Order not found".into()),
		OrderError::InvalidStatus(_) => ApiError::BadRequest("Invalid order status".into()),
		OrderError::InvalidTransition { from, to } => ApiError::BadRequest(format!(
			"Invalid status transition from {} to {}",
			from, to
		)),
		OrderError::Storage(m) => ApiError::InternalServerError(m),
	}
}
