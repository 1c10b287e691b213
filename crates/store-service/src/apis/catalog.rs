//! Product and category endpoints for the storefront API.

use axum::extract::{Path, State};
use axum::response::Json;
use store_catalog::CatalogError;
use store_types::{
	ApiError, CategoryCreatedResponse, CategoryListResponse, MessageResponse, NewCategory,
	NewProduct, ProductCreatedResponse, ProductListResponse, ProductResponse,
};
use tracing::warn;

use crate::server::AppState;

/// Handles GET /api/products requests.
pub async fn list_products(
	State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, ApiError> {
	match state.catalog.list_products().await {
		Ok(products) => {
			let count = products.len();
			Ok(Json(ProductListResponse {
				success: true,
				products,
				count,
			}))
		},
		Err(e) => {
			warn!("Product listing failed: {}", e);
			Err(ApiError::InternalServerError(
				"Failed to fetch products".into(),
			))
		},
	}
}

/// Handles GET /api/products/{product_id} requests.
pub async fn get_product(
	State(state): State<AppState>,
	Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
	match state.catalog.get_product(&product_id).await {
		Ok(product) => Ok(Json(ProductResponse {
			success: true,
			product,
		})),
		Err(e) => Err(map_catalog_error(e)),
	}
}

/// Handles POST /api/products requests.
pub async fn create_product(
	State(state): State<AppState>,
	Json(submission): Json<NewProduct>,
) -> Result<Json<ProductCreatedResponse>, ApiError> {
	match state.catalog.create_product(submission).await {
		Ok(product) => Ok(Json(ProductCreatedResponse {
			success: true,
			message: "Product added successfully".into(),
			product_id: product.id,
		})),
		Err(e) => {
			warn!("Product creation failed: {}", e);
			Err(map_catalog_error(e))
		},
	}
}

/// Handles PATCH /api/products/{product_id} requests.
pub async fn update_product(
	State(state): State<AppState>,
	Path(product_id): Path<String>,
	Json(patch): Json<serde_json::Value>,
) -> Result<Json<MessageResponse>, ApiError> {
	match state.catalog.update_product(&product_id, patch).await {
		Ok(()) => Ok(Json(MessageResponse {
			success: true,
			message: "Product updated successfully".into(),
		})),
		Err(e) => {
			warn!("Product update failed: {}", e);
			Err(map_catalog_error(e))
		},
	}
}

/// Handles DELETE /api/products/{product_id} requests.
pub async fn delete_product(
	State(state): State<AppState>,
	Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
	match state.catalog.delete_product(&product_id).await {
		Ok(()) => Ok(Json(MessageResponse {
			success: true,
			message: "Product deleted successfully".into(),
		})),
		Err(e) => {
			warn!("Product deletion failed: {}", e);
			Err(map_catalog_error(e))
		},
	}
}

/// Handles GET /api/categories requests.
pub async fn list_categories(
	State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
	match state.catalog.list_categories().await {
		Ok(categories) => Ok(Json(CategoryListResponse {
			success: true,
			categories,
		})),
		Err(e) => {
			warn!("Category listing failed: {}", e);
			Err(ApiError::InternalServerError(
				"Failed to fetch categories".into(),
			))
		},
	}
}

/// Handles POST /api/categories requests.
pub async fn create_category(
	State(state): State<AppState>,
	Json(submission): Json<NewCategory>,
) -> Result<Json<CategoryCreatedResponse>, ApiError> {
	match state.catalog.create_category(submission).await {
		Ok(category) => Ok(Json(CategoryCreatedResponse {
			success: true,
			message: "Category added successfully".into(),
			category_id: category.id,
		})),
		Err(e) => {
			warn!("Category creation failed: {}", e);
			Err(map_catalog_error(e))
		},
	}
}

/// Maps catalog errors onto the HTTP error taxonomy.
fn map_catalog_error(e: CatalogError) -> ApiError {
	match e {
		CatalogError::Validation(m) => ApiError::BadRequest(m),
		CatalogError::NotFound => ApiError::NotFound("Product not found".into()),
		CatalogError::Timeout(m) => ApiError::InternalServerError(m),
		CatalogError::Storage(m) => ApiError::InternalServerError(m),
	}
}
