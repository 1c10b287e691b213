//! Catalog module for the storefront backend.
//!
//! Products and categories are simple documents with a CRUD surface;
//! there is no workflow here. The one wrinkle is the save deadline:
//! product creation waits a bounded time for the storage write and then
//! reports failure, while the write itself keeps running. A save that
//! "failed" this way may still land in storage later, so a retry can
//! produce a duplicate; callers surface the failure without retrying.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use store_storage::{StorageError, StorageService};
use store_types::{Category, NewCategory, NewProduct, Product, SizeVariant, StorageKey};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Error that occurs when a submission is missing required input.
	#[error("{0}")]
	Validation(String),
	/// Error that occurs when a referenced product is absent.
	#[error("Product not found")]
	NotFound,
	/// Error that occurs when the save deadline elapses before the
	/// storage write completes. The write was abandoned, not cancelled.
	#[error("{0}")]
	Timeout(String),
	/// Error that occurs when the underlying storage operation fails.
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<StorageError> for CatalogError {
	fn from(e: StorageError) -> Self {
		match e {
			StorageError::NotFound => CatalogError::NotFound,
			other => CatalogError::Storage(other.to_string()),
		}
	}
}

/// Repository managing the products and categories collections.
pub struct CatalogRepository {
	storage: Arc<StorageService>,
	/// How long a product save waits for the storage write.
	save_deadline: Duration,
}

impl CatalogRepository {
	pub fn new(storage: Arc<StorageService>, save_deadline: Duration) -> Self {
		Self {
			storage,
			save_deadline,
		}
	}

	/// Lists every product in the catalog.
	pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
		Ok(self
			.storage
			.retrieve_all(StorageKey::Products.as_str())
			.await?)
	}

	/// Fetches a single product by id.
	pub async fn get_product(&self, product_id: &str) -> Result<Product, CatalogError> {
		Ok(self
			.storage
			.retrieve(StorageKey::Products.as_str(), product_id)
			.await?)
	}

	/// Persists a new product from an admin submission.
	///
	/// Variant prices fall back to the product-level prices when the form
	/// left them blank. The wait for the storage write is bounded by the
	/// configured deadline; see the module docs for what a timeout means.
	pub async fn create_product(&self, submission: NewProduct) -> Result<Product, CatalogError> {
		if submission.name.is_empty() {
			return Err(CatalogError::Validation("Product name is required".into()));
		}
		let original_price = submission
			.original_price
			.ok_or_else(|| CatalogError::Validation("originalPrice is required".into()))?;
		let discounted_price = submission
			.discounted_price
			.ok_or_else(|| CatalogError::Validation("discountedPrice is required".into()))?;

		let product = Product {
			id: Uuid::new_v4().to_string(),
			name: submission.name,
			description: submission.description,
			original_price,
			discounted_price,
			category: submission.category,
			product_type: submission.product_type,
			image: submission.image,
			size_variants: submission
				.size_variants
				.into_iter()
				.map(|sv| SizeVariant {
					size: sv.size,
					original_price: sv.original_price.unwrap_or(original_price),
					discounted_price: sv.discounted_price.unwrap_or(discounted_price),
				})
				.collect(),
			label: submission.label,
			note: submission.note.unwrap_or_default(),
			created_at: Utc::now(),
		};

		self.persist_with_deadline(product.clone()).await?;
		tracing::info!(product_id = %product.id, "Product created");
		Ok(product)
	}

	/// Waits for the product write up to the save deadline.
	///
	/// The write runs on its own task: when the deadline elapses the wait
	/// is abandoned but the task keeps running, so the document may still
	/// appear in storage after the error was reported.
	async fn persist_with_deadline(&self, product: Product) -> Result<(), CatalogError> {
		let storage = Arc::clone(&self.storage);
		let product_id = product.id.clone();
		let write = tokio::spawn(async move {
			storage
				.store(StorageKey::Products.as_str(), &product.id, &product)
				.await
		});

		match tokio::time::timeout(self.save_deadline, write).await {
			Ok(Ok(result)) => Ok(result?),
			Ok(Err(join_error)) => Err(CatalogError::Storage(join_error.to_string())),
			Err(_) => {
				tracing::warn!(product_id = %product_id, "Product save abandoned after deadline");
				Err(CatalogError::Timeout(format!(
					"Save timed out after {}s - the write was not cancelled",
					self.save_deadline.as_secs()
				)))
			},
		}
	}

	/// Applies a partial update to a product.
	///
	/// The patch is a JSON object whose top-level fields replace the
	/// stored document's fields; everything else is left intact. An
	/// empty patch is rejected.
	pub async fn update_product(
		&self,
		product_id: &str,
		patch: serde_json::Value,
	) -> Result<(), CatalogError> {
		let fields = match patch.as_object() {
			Some(map) if !map.is_empty() => map.clone(),
			_ => {
				return Err(CatalogError::Validation("No update data provided".into()));
			},
		};

		let mut document: serde_json::Value = self
			.storage
			.retrieve(StorageKey::Products.as_str(), product_id)
			.await?;

		if let Some(target) = document.as_object_mut() {
			for (key, value) in fields {
				target.insert(key, value);
			}
		}

		self.storage
			.update(StorageKey::Products.as_str(), product_id, &document)
			.await?;
		Ok(())
	}

	/// Removes a product. Deleting an absent id is not an error.
	pub async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
		self.storage
			.remove(StorageKey::Products.as_str(), product_id)
			.await?;
		tracing::info!(product_id = %product_id, "Product deleted");
		Ok(())
	}

	/// Lists every category.
	pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
		Ok(self
			.storage
			.retrieve_all(StorageKey::Categories.as_str())
			.await?)
	}

	/// Persists a new category.
	pub async fn create_category(&self, submission: NewCategory) -> Result<Category, CatalogError> {
		if submission.name.is_empty() || submission.product_type.is_empty() {
			return Err(CatalogError::Validation(
				"Category name and productType are required".into(),
			));
		}

		let category = Category {
			id: Uuid::new_v4().to_string(),
			name: submission.name,
			product_type: submission.product_type,
		};

		self.storage
			.store(StorageKey::Categories.as_str(), &category.id, &category)
			.await?;
		Ok(category)
	}
}
