//! Status workflow for order fulfilment.
//!
//! Orders are presented as progressing Placed -> Packed -> Shipped ->
//! Delivered, but the default policy accepts any value-to-value jump,
//! including away from Delivered. The forward-only policy is an opt-in
//! configuration toggle, not the default.

use crate::OrderError;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use store_types::OrderStatus;

/// Parses a raw status label, rejecting anything outside the four
/// enumerated values before any storage access happens.
pub fn parse_status(raw: &str) -> Result<OrderStatus, OrderError> {
	raw.parse::<OrderStatus>()
		.map_err(|_| OrderError::InvalidStatus(raw.to_string()))
}

/// Policy governing which status transitions a repository accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
	/// Any of the four statuses may be set from any other. This matches
	/// the admin workflow as operated: a mis-click can be corrected by
	/// jumping back.
	Permissive,
	/// Statuses may only advance to their immediate successor;
	/// Delivered is terminal.
	ForwardOnly,
}

// Forward-only transition table - each state maps to its allowed successors
static FORWARD_TRANSITIONS: Lazy<HashMap<OrderStatus, HashSet<OrderStatus>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(OrderStatus::Placed, HashSet::from([OrderStatus::Packed]));
	m.insert(OrderStatus::Packed, HashSet::from([OrderStatus::Shipped]));
	m.insert(OrderStatus::Shipped, HashSet::from([OrderStatus::Delivered]));
	m.insert(OrderStatus::Delivered, HashSet::new()); // terminal
	m
});

impl TransitionPolicy {
	/// Derives the policy from the configuration toggle.
	pub fn from_config(enforce_progression: bool) -> Self {
		if enforce_progression {
			TransitionPolicy::ForwardOnly
		} else {
			TransitionPolicy::Permissive
		}
	}

	/// Checks whether this policy accepts the given transition.
	pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
		match self {
			TransitionPolicy::Permissive => true,
			TransitionPolicy::ForwardOnly => FORWARD_TRANSITIONS
				.get(&from)
				.is_some_and(|set| set.contains(&to)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_accepts_exactly_the_four_labels() {
		assert!(parse_status("Placed").is_ok());
		assert!(parse_status("Packed").is_ok());
		assert!(parse_status("Shipped").is_ok());
		assert!(parse_status("Delivered").is_ok());

		for bad in ["placed", "Returned", "", "DELIVERED", "Shipped "] {
			assert!(matches!(
				parse_status(bad),
				Err(OrderError::InvalidStatus(_))
			));
		}
	}

	#[test]
	fn permissive_allows_any_jump() {
		let policy = TransitionPolicy::Permissive;
		for from in OrderStatus::all() {
			for to in OrderStatus::all() {
				assert!(policy.allows(from, to));
			}
		}
	}

	#[test]
	fn forward_only_allows_only_successors() {
		let policy = TransitionPolicy::ForwardOnly;

		assert!(policy.allows(OrderStatus::Placed, OrderStatus::Packed));
		assert!(policy.allows(OrderStatus::Packed, OrderStatus::Shipped));
		assert!(policy.allows(OrderStatus::Shipped, OrderStatus::Delivered));

		// no skipping ahead
		assert!(!policy.allows(OrderStatus::Placed, OrderStatus::Shipped));
		// no going back
		assert!(!policy.allows(OrderStatus::Delivered, OrderStatus::Placed));
		assert!(!policy.allows(OrderStatus::Shipped, OrderStatus::Packed));
		// no re-setting the same status
		assert!(!policy.allows(OrderStatus::Packed, OrderStatus::Packed));
	}

	#[test]
	fn policy_comes_from_the_toggle() {
		assert_eq!(
			TransitionPolicy::from_config(false),
			TransitionPolicy::Permissive
		);
		assert_eq!(
			TransitionPolicy::from_config(true),
			TransitionPolicy::ForwardOnly
		);
	}
}
