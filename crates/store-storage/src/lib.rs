//! Storage module for the storefront backend.
//!
//! This module provides abstractions over the document store holding the
//! orders, products, and categories collections, supporting different
//! backend implementations such as in-memory or file-based storage.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use store_types::{ConfigSchema, ImplementationRegistry};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested document is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// This trait must be implemented by any storage backend that wants to
/// hold the storefront collections. It provides basic key-value
/// operations plus key enumeration, which the repositories use for
/// collection-wide reads.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, creating or overwriting.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key. Deleting an
	/// absent key is not an error.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Returns every key starting with the given prefix.
	async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that all storage implementations must
/// provide to create instances of their storage interface.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Registry trait for storage implementations.
pub trait StorageRegistry: ImplementationRegistry<Factory = StorageFactory> {}

/// Get all registered storage implementations.
///
/// Returns a vector of (name, factory) tuples for all available storage
/// implementations, used by the startup wiring to build its factory map.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		(file::Registry::NAME, file::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// High-level storage service that provides typed operations.
///
/// The StorageService wraps a low-level storage backend and provides
/// convenient methods for storing and retrieving typed documents with
/// automatic JSON serialization. Collection reads go through
/// [`StorageService::retrieve_all`] and [`StorageService::find_by_field`];
/// the default behavior is a full scan with in-memory filtering, which an
/// indexed backend may replace without changing caller contracts.
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	fn key(namespace: &str, id: &str) -> String {
		format!("{}:{}", namespace, id)
	}

	/// Stores a serializable document, creating or overwriting.
	///
	/// The namespace and id are combined to form a unique key. The data
	/// is serialized to JSON before storage.
	pub async fn store<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&Self::key(namespace, id), bytes).await
	}

	/// Retrieves and deserializes a document from storage.
	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let bytes = self.backend.get_bytes(&Self::key(namespace, id)).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Updates an existing document in storage.
	///
	/// This method first checks that the key exists, then overwrites the
	/// value. Returns an error if the key doesn't exist, making it
	/// semantically different from store() which will create or overwrite.
	pub async fn update<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let key = Self::key(namespace, id);

		if !self.backend.exists(&key).await? {
			return Err(StorageError::NotFound);
		}

		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&key, bytes).await
	}

	/// Removes a document from storage.
	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		self.backend.delete(&Self::key(namespace, id)).await
	}

	/// Checks if a document exists in storage.
	pub async fn exists(&self, namespace: &str, id: &str) -> Result<bool, StorageError> {
		self.backend.exists(&Self::key(namespace, id)).await
	}

	/// Retrieves every document in a namespace.
	///
	/// The result is in storage order, which is not guaranteed to be
	/// sorted. Documents deleted concurrently with the scan are skipped.
	pub async fn retrieve_all<T: DeserializeOwned>(
		&self,
		namespace: &str,
	) -> Result<Vec<T>, StorageError> {
		let prefix = format!("{}:", namespace);
		let keys = self.backend.list_keys(&prefix).await?;

		let mut items = Vec::with_capacity(keys.len());
		for key in keys {
			match self.backend.get_bytes(&key).await {
				Ok(bytes) => {
					let item = serde_json::from_slice(&bytes)
						.map_err(|e| StorageError::Serialization(e.to_string()))?;
					items.push(item);
				},
				Err(StorageError::NotFound) => continue,
				Err(e) => return Err(e),
			}
		}
		Ok(items)
	}

	/// Retrieves the documents in a namespace whose named top-level field
	/// equals the given value.
	///
	/// The default implementation is a full scan followed by in-memory
	/// filtering; the method exists as the seam where an indexed backend
	/// would plug in a server-side query.
	pub async fn find_by_field<T: DeserializeOwned>(
		&self,
		namespace: &str,
		field: &str,
		value: &serde_json::Value,
	) -> Result<Vec<T>, StorageError> {
		let documents: Vec<serde_json::Value> = self.retrieve_all(namespace).await?;

		let mut matches = Vec::new();
		for document in documents {
			if document.get(field) == Some(value) {
				let item = serde_json::from_value(document)
					.map_err(|e| StorageError::Serialization(e.to_string()))?;
				matches.push(item);
			}
		}
		Ok(matches)
	}
}

#[cfg(test)]
mod tests {
	use super::implementations::memory::MemoryStorage;
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, Serialize, Deserialize, PartialEq)]
	struct Doc {
		id: String,
		owner: String,
	}

	fn service() -> StorageService {
		StorageService::new(Box::new(MemoryStorage::new()))
	}

	#[tokio::test]
	async fn typed_store_and_retrieve() {
		let storage = service();
		let doc = Doc {
			id: "1".into(),
			owner: "u1".into(),
		};

		storage.store("orders", "1", &doc).await.unwrap();
		let back: Doc = storage.retrieve("orders", "1").await.unwrap();
		assert_eq!(back, doc);
	}

	#[tokio::test]
	async fn update_requires_existing_key() {
		let storage = service();
		let doc = Doc {
			id: "1".into(),
			owner: "u1".into(),
		};

		let result = storage.update("orders", "1", &doc).await;
		assert!(matches!(result, Err(StorageError::NotFound)));

		storage.store("orders", "1", &doc).await.unwrap();
		assert!(storage.update("orders", "1", &doc).await.is_ok());
	}

	#[tokio::test]
	async fn retrieve_all_is_scoped_to_namespace() {
		let storage = service();
		for id in ["1", "2", "3"] {
			let doc = Doc {
				id: id.into(),
				owner: "u1".into(),
			};
			storage.store("orders", id, &doc).await.unwrap();
		}
		storage
			.store(
				"products",
				"p1",
				&Doc {
					id: "p1".into(),
					owner: "shop".into(),
				},
			)
			.await
			.unwrap();

		let orders: Vec<Doc> = storage.retrieve_all("orders").await.unwrap();
		assert_eq!(orders.len(), 3);
	}

	#[tokio::test]
	async fn find_by_field_matches_exactly() {
		let storage = service();
		for (id, owner) in [("1", "u1"), ("2", "u2"), ("3", "u1")] {
			let doc = Doc {
				id: id.into(),
				owner: owner.into(),
			};
			storage.store("orders", id, &doc).await.unwrap();
		}

		let mine: Vec<Doc> = storage
			.find_by_field("orders", "owner", &serde_json::json!("u1"))
			.await
			.unwrap();
		assert_eq!(mine.len(), 2);
		assert!(mine.iter().all(|d| d.owner == "u1"));

		let none: Vec<Doc> = storage
			.find_by_field("orders", "owner", &serde_json::json!("U1"))
			.await
			.unwrap();
		assert!(none.is_empty());
	}
}
