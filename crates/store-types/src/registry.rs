//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that storage backends (and any
//! future pluggable component) implement to register themselves with
//! their configuration name and factory function.

/// Base trait for implementation registries.
///
/// Each backend module provides a Registry struct that implements this
/// trait, declaring the name it is referenced by in configuration files
/// and the factory that constructs it.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the key used in the TOML configuration, for example:
	/// - "memory" for storage.implementations.memory
	/// - "file" for storage.implementations.file
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
