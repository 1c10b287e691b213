//! HTTP server for the storefront API.
//!
//! This module provides the router, shared state, and CORS policy for
//! the storefront API, and the listener loop that serves it.

use axum::{
	http::{header, Method},
	routing::{get, patch, post},
	Router,
};
use std::sync::Arc;
use store_catalog::CatalogRepository;
use store_config::{AdminConfig, ApiConfig};
use store_order::{OrderRepository, OrderValidator};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::apis;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Repository for the orders collection.
	pub orders: Arc<OrderRepository>,
	/// Repository for products and categories.
	pub catalog: Arc<CatalogRepository>,
	/// Validator applying order intake rules and defaults.
	pub validator: OrderValidator,
	/// Allowlist for the admin status-update endpoint.
	pub admin: AdminConfig,
}

/// Builds the API router with routing and CORS middleware.
pub fn router(state: AppState) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route(
					"/orders",
					post(apis::order::create_order).get(apis::order::list_orders),
				)
				.route("/orders/update-status", patch(apis::order::update_status))
				.route(
					"/orders/latest/{phone_number}",
					get(apis::order::latest_order_by_phone),
				)
				.route(
					"/products",
					get(apis::catalog::list_products).post(apis::catalog::create_product),
				)
				.route(
					"/products/{product_id}",
					get(apis::catalog::get_product)
						.patch(apis::catalog::update_product)
						.delete(apis::catalog::delete_product),
				)
				.route(
					"/categories",
					get(apis::catalog::list_categories).post(apis::catalog::create_category),
				),
		)
		.layer(ServiceBuilder::new().layer(cors_layer()))
		.with_state(state)
}

/// Permissive CORS policy for the storefront clients.
fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([
			Method::GET,
			Method::POST,
			Method::PATCH,
			Method::DELETE,
			Method::OPTIONS,
		])
		.allow_headers([header::CONTENT_TYPE])
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Storefront API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
