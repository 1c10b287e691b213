//! Main entry point for the storefront backend service.
//!
//! This binary wires the configured storage backend into the order and
//! catalog repositories and serves the HTTP API until interrupted.

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use store_config::Config;
use store_order::{OrderRepository, OrderValidator, TransitionPolicy};
use store_storage::{StorageFactory, StorageService};

mod apis;
mod server;

/// Command-line arguments for the storefront service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the storefront service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the storage backend and repositories
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started storefront service");

	let config = Config::from_file(args.config.to_str().unwrap())?;
	tracing::info!("Loaded configuration [{}]", config.store.id);

	let state = build_state(&config)?;
	server::start_server(config.api.clone(), state).await?;

	tracing::info!("Stopped storefront service");
	Ok(())
}

/// Builds the shared application state from configuration.
///
/// Creates the primary storage backend via the factory registry,
/// validates its configuration fragment against the backend's schema,
/// and constructs the repositories on top.
fn build_state(config: &Config) -> Result<server::AppState, Box<dyn std::error::Error>> {
	let factories: HashMap<&'static str, StorageFactory> =
		store_storage::get_all_implementations().into_iter().collect();

	let factory = factories
		.get(config.storage.primary.as_str())
		.ok_or_else(|| format!("Unknown storage backend '{}'", config.storage.primary))?;

	let backend_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.cloned()
		.unwrap_or(toml::Value::Table(Default::default()));

	let backend = factory(&backend_config)?;
	backend.config_schema().validate(&backend_config)?;

	let storage = Arc::new(StorageService::new(backend));

	let orders = Arc::new(OrderRepository::new(
		Arc::clone(&storage),
		TransitionPolicy::from_config(config.orders.enforce_progression),
	));
	let catalog = Arc::new(store_catalog::CatalogRepository::new(
		Arc::clone(&storage),
		Duration::from_secs(config.orders.save_deadline_seconds),
	));

	Ok(server::AppState {
		orders,
		catalog,
		validator: OrderValidator::new(config.orders.default_shipping),
		admin: config.admin.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const MEMORY_CONFIG: &str = r#"
[store]
id = "test-store"

[storage]
primary = "memory"

[storage.implementations.memory]
"#;

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_build_state_with_memory_backend() {
		let config = Config::from_toml_str(MEMORY_CONFIG).unwrap();
		assert!(build_state(&config).is_ok());
	}

	#[test]
	fn test_build_state_rejects_unknown_backend() {
		let config = Config::from_toml_str(
			r#"
[store]
id = "test-store"

[storage]
primary = "redis"

[storage.implementations.redis]
"#,
		)
		.unwrap();

		assert!(build_state(&config).is_err());
	}

	#[test]
	fn test_factory_registry_contains_both_backends() {
		let factories: HashMap<&'static str, StorageFactory> =
			store_storage::get_all_implementations().into_iter().collect();

		assert!(factories.contains_key("memory"));
		assert!(factories.contains_key("file"));
	}
}
