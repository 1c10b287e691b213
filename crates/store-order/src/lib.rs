//! Order processing module for the storefront backend.
//!
//! This module holds the order intake and fulfilment core: submission
//! validation, the order repository over the storage service, and the
//! status workflow governing which fulfilment labels an order may take.

use store_types::OrderStatus;
use thiserror::Error;

pub mod repository;
pub mod validator;
pub mod workflow;

pub use repository::{OrderFilter, OrderListing, OrderRepository};
pub use validator::{OrderDraft, OrderValidator};
pub use workflow::TransitionPolicy;

/// Errors that can occur during order processing operations.
#[derive(Debug, Error)]
pub enum OrderError {
	/// Error that occurs when a submission is missing required input.
	#[error("{0}")]
	Validation(String),
	/// Error that occurs when a referenced order is absent.
	#[error("Order not found")]
	NotFound,
	/// Error that occurs when a status label is not one of the
	/// enumerated values.
	#[error("Invalid order status")]
	InvalidStatus(String),
	/// Error that occurs when the workflow policy rejects a transition.
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	/// Error that occurs when the underlying storage operation fails.
	#[error("Storage error: {0}")]
	Storage(String),
}
