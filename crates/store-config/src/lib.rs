//! Configuration module for the storefront backend.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required values are properly set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the storefront backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this store instance.
	pub store: StoreConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the HTTP API server.
	#[serde(default)]
	pub api: ApiConfig,
	/// Admin allowlist for privileged operations.
	#[serde(default)]
	pub admin: AdminConfig,
	/// Order intake and workflow settings.
	#[serde(default)]
	pub orders: OrdersConfig,
}

/// Configuration specific to this store instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
	/// Unique identifier for this store instance.
	pub id: String,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			host: default_api_host(),
			port: default_api_port(),
		}
	}
}

/// Admin allowlist for privileged operations.
///
/// The list is injected configuration rather than a hardcoded constant.
/// An empty list disables the check entirely, leaving authorization to
/// the surrounding identity provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
	/// Email addresses permitted to change order statuses.
	#[serde(default)]
	pub emails: Vec<String>,
}

impl AdminConfig {
	/// Checks whether the given identity is on the allowlist.
	///
	/// Comparison is case-insensitive on both sides.
	pub fn is_admin(&self, email: &str) -> bool {
		let email = email.to_lowercase();
		self.emails.iter().any(|e| e.to_lowercase() == email)
	}

	/// Whether the allowlist check is active at all.
	pub fn is_enabled(&self) -> bool {
		!self.emails.is_empty()
	}
}

/// Order intake and workflow settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrdersConfig {
	/// Shipping charge applied when a submission omits one.
	#[serde(default = "default_shipping")]
	pub default_shipping: f64,
	/// When true, status updates must follow the forward-only
	/// progression Placed -> Packed -> Shipped -> Delivered. The default
	/// accepts any value-to-value jump.
	#[serde(default)]
	pub enforce_progression: bool,
	/// Seconds a catalog save waits for the storage write before
	/// reporting failure. The write itself is not cancelled.
	#[serde(default = "default_save_deadline")]
	pub save_deadline_seconds: u64,
}

impl Default for OrdersConfig {
	fn default() -> Self {
		Self {
			default_shipping: default_shipping(),
			enforce_progression: false,
			save_deadline_seconds: default_save_deadline(),
		}
	}
}

/// Returns the default API host.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	3000
}

/// Returns the default shipping charge.
fn default_shipping() -> f64 {
	70.0
}

/// Returns the default catalog save deadline in seconds.
fn default_save_deadline() -> u64 {
	15
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml_str(&contents)
	}

	/// Parses configuration from a TOML string.
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration to ensure all required fields are
	/// properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.store.id.is_empty() {
			return Err(ConfigError::Validation("Store ID cannot be empty".into()));
		}

		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage backend must be specified".into(),
			));
		}

		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' has no configuration section",
				self.storage.primary
			)));
		}

		if self.orders.default_shipping < 0.0 {
			return Err(ConfigError::Validation(
				"Default shipping charge cannot be negative".into(),
			));
		}

		Ok(())
	}
}
