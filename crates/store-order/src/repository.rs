//! Order repository over the storage service.
//!
//! CRUD surface for the orders collection: creation with server-assigned
//! fields, collection listing with in-memory filtering, latest-order
//! lookup by phone number, and status updates governed by the workflow
//! policy.
//!
//! Listing deliberately fetches the whole collection and filters in
//! memory. That is acceptable at this catalog's scale; an indexed
//! backend can swap in behind the storage service's find_by_field seam
//! without changing any caller contract.

use crate::{OrderDraft, OrderError, TransitionPolicy};
use chrono::Utc;
use std::sync::Arc;
use store_storage::{StorageError, StorageService};
use store_types::{Order, OrderStatus, StorageKey};
use uuid::Uuid;

/// Optional narrowing applied to a collection listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
	/// Keep only orders placed by this user id.
	pub user_id: Option<String>,
	/// Resolve to exactly this order.
	pub order_id: Option<String>,
}

/// Result of a listing: the (possibly filtered) collection, or a single
/// order when the filter named one.
#[derive(Debug)]
pub enum OrderListing {
	Many(Vec<Order>),
	Single(Order),
}

/// Repository managing the orders collection.
pub struct OrderRepository {
	storage: Arc<StorageService>,
	policy: TransitionPolicy,
}

impl OrderRepository {
	pub fn new(storage: Arc<StorageService>, policy: TransitionPolicy) -> Self {
		Self { storage, policy }
	}

	/// Persists a new order from a validated draft.
	///
	/// Assigns the id, the Placed status, and the creation timestamp.
	/// The write is attempted exactly once; a failure surfaces to the
	/// caller without retry.
	pub async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError> {
		let order = Order {
			id: Uuid::new_v4().to_string(),
			customer_name: draft.customer_name,
			phone_number: draft.phone_number,
			whatsapp_number: draft.whatsapp_number,
			delivery_address: draft.delivery_address,
			landmark: draft.landmark,
			city: draft.city,
			pincode: draft.pincode,
			order_message: draft.order_message,
			ordered_products: draft.ordered_products,
			user_id: draft.user_id,
			user_email: draft.user_email,
			size: draft.size,
			shipping: draft.shipping,
			order_status: OrderStatus::Placed,
			created_at: Utc::now(),
			updated_at: None,
		};

		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, &order)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		tracing::info!(order_id = %order.id, "Order created");
		Ok(order)
	}

	/// Fetches the whole collection and applies the filter in memory.
	///
	/// A `user_id` keeps only that user's orders; an `order_id` resolves
	/// to a single order or fails with not-found. Without an `order_id`
	/// the result is the remaining sequence in storage order.
	pub async fn list(&self, filter: OrderFilter) -> Result<OrderListing, OrderError> {
		let mut orders: Vec<Order> = self
			.storage
			.retrieve_all(StorageKey::Orders.as_str())
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		if let Some(user_id) = &filter.user_id {
			orders.retain(|o| o.user_id.as_deref() == Some(user_id.as_str()));
		}

		match &filter.order_id {
			Some(order_id) => orders
				.into_iter()
				.find(|o| &o.id == order_id)
				.map(OrderListing::Single)
				.ok_or(OrderError::NotFound),
			None => Ok(OrderListing::Many(orders)),
		}
	}

	/// Fetches a single order by id.
	pub async fn get(&self, order_id: &str) -> Result<Order, OrderError> {
		match self
			.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
		{
			Ok(order) => Ok(order),
			Err(StorageError::NotFound) => Err(OrderError::NotFound),
			Err(e) => Err(OrderError::Storage(e.to_string())),
		}
	}

	/// Returns the most recently created order for a phone number.
	pub async fn latest_by_phone(&self, phone_number: &str) -> Result<Order, OrderError> {
		if phone_number.is_empty() {
			return Err(OrderError::Validation("phoneNumber is required".into()));
		}

		let mut orders: Vec<Order> = self
			.storage
			.find_by_field(
				StorageKey::Orders.as_str(),
				"phoneNumber",
				&serde_json::json!(phone_number),
			)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		orders.into_iter().next().ok_or(OrderError::NotFound)
	}

	/// Sets a new status on an order and stamps the update time.
	///
	/// The status value must already be parsed; the workflow policy
	/// decides whether the jump from the current status is acceptable.
	/// An unknown order id surfaces as an update failure, matching the
	/// gateway's behavior of erroring the write rather than reporting
	/// absence.
	pub async fn update_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, OrderError> {
		if order_id.is_empty() {
			return Err(OrderError::Validation(
				"Missing orderId or orderStatus".into(),
			));
		}

		let mut order: Order = match self
			.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
		{
			Ok(order) => order,
			Err(StorageError::NotFound) => {
				return Err(OrderError::Storage(format!(
					"No order with id {}",
					order_id
				)))
			},
			Err(e) => return Err(OrderError::Storage(e.to_string())),
		};

		if !self.policy.allows(order.order_status, new_status) {
			return Err(OrderError::InvalidTransition {
				from: order.order_status,
				to: new_status,
			});
		}

		order.order_status = new_status;
		order.updated_at = Some(Utc::now());

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		tracing::info!(order_id = %order_id, status = %new_status, "Order status updated");
		Ok(order)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::OrderValidator;
	use store_storage::implementations::memory::MemoryStorage;
	use store_types::{OrderSubmission, OrderedProduct};

	fn repository(policy: TransitionPolicy) -> OrderRepository {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		OrderRepository::new(storage, policy)
	}

	fn submission(name: &str, phone: &str, user_id: Option<&str>) -> OrderSubmission {
		OrderSubmission {
			customer_name: name.into(),
			phone_number: phone.into(),
			ordered_products: vec![OrderedProduct {
				name: "Bangle Set".into(),
				quantity: 2,
				product_id: None,
			}],
			user_id: user_id.map(Into::into),
			..Default::default()
		}
	}

	async fn place_order(repo: &OrderRepository, submission: OrderSubmission) -> Order {
		let draft = OrderValidator::new(70.0).validate(submission).unwrap();
		repo.create(draft).await.unwrap()
	}

	#[tokio::test]
	async fn created_order_defaults_and_round_trip() {
		let repo = repository(TransitionPolicy::Permissive);
		let order = place_order(&repo, submission("Asha", "9876543210", None)).await;

		assert!(!order.id.is_empty());
		assert_eq!(order.order_status, OrderStatus::Placed);
		assert_eq!(order.shipping, 70.0);
		assert!(order.updated_at.is_none());

		let fetched = repo.get(&order.id).await.unwrap();
		assert_eq!(fetched.ordered_products[0].quantity, 2);
		assert_eq!(fetched.order_status, OrderStatus::Placed);
	}

	#[tokio::test]
	async fn list_filters_by_user_id() {
		let repo = repository(TransitionPolicy::Permissive);
		place_order(&repo, submission("Asha", "111", Some("u1"))).await;
		place_order(&repo, submission("Bina", "222", Some("u2"))).await;
		place_order(&repo, submission("Asha", "111", Some("u1"))).await;

		let listing = repo
			.list(OrderFilter {
				user_id: Some("u1".into()),
				order_id: None,
			})
			.await
			.unwrap();

		match listing {
			OrderListing::Many(orders) => {
				assert_eq!(orders.len(), 2);
				assert!(orders.iter().all(|o| o.user_id.as_deref() == Some("u1")));
			},
			OrderListing::Single(_) => panic!("expected a list"),
		}
	}

	#[tokio::test]
	async fn list_resolves_single_order_by_id() {
		let repo = repository(TransitionPolicy::Permissive);
		let order = place_order(&repo, submission("Asha", "111", None)).await;

		let listing = repo
			.list(OrderFilter {
				user_id: None,
				order_id: Some(order.id.clone()),
			})
			.await
			.unwrap();
		assert!(matches!(listing, OrderListing::Single(o) if o.id == order.id));

		let missing = repo
			.list(OrderFilter {
				user_id: None,
				order_id: Some("absent".into()),
			})
			.await;
		assert!(matches!(missing, Err(OrderError::NotFound)));
	}

	#[tokio::test]
	async fn latest_by_phone_picks_newest() {
		let repo = repository(TransitionPolicy::Permissive);
		let _first = place_order(&repo, submission("Asha", "9876543210", None)).await;
		let second = place_order(&repo, submission("Asha", "9876543210", None)).await;
		place_order(&repo, submission("Bina", "555", None)).await;

		let latest = repo.latest_by_phone("9876543210").await.unwrap();
		assert_eq!(latest.id, second.id);

		assert!(matches!(
			repo.latest_by_phone("000").await,
			Err(OrderError::NotFound)
		));
		assert!(matches!(
			repo.latest_by_phone("").await,
			Err(OrderError::Validation(_))
		));
	}

	#[tokio::test]
	async fn update_status_stamps_updated_at() {
		let repo = repository(TransitionPolicy::Permissive);
		let order = place_order(&repo, submission("Asha", "111", None)).await;

		let updated = repo
			.update_status(&order.id, OrderStatus::Shipped)
			.await
			.unwrap();
		assert_eq!(updated.order_status, OrderStatus::Shipped);
		let stamped = updated.updated_at.expect("updated_at set");
		assert!(stamped >= updated.created_at);

		let fetched = repo.get(&order.id).await.unwrap();
		assert_eq!(fetched.order_status, OrderStatus::Shipped);
	}

	#[tokio::test]
	async fn repeated_update_is_idempotent_on_status() {
		let repo = repository(TransitionPolicy::Permissive);
		let order = place_order(&repo, submission("Asha", "111", None)).await;

		let first = repo
			.update_status(&order.id, OrderStatus::Packed)
			.await
			.unwrap();
		let second = repo
			.update_status(&order.id, OrderStatus::Packed)
			.await
			.unwrap();

		assert_eq!(first.order_status, OrderStatus::Packed);
		assert_eq!(second.order_status, OrderStatus::Packed);
		// the stamp moves on every call even when the status does not
		assert!(second.updated_at.unwrap() >= first.updated_at.unwrap());
	}

	#[tokio::test]
	async fn permissive_policy_accepts_backward_jumps() {
		let repo = repository(TransitionPolicy::Permissive);
		let order = place_order(&repo, submission("Asha", "111", None)).await;

		repo.update_status(&order.id, OrderStatus::Delivered)
			.await
			.unwrap();
		let reverted = repo
			.update_status(&order.id, OrderStatus::Placed)
			.await
			.unwrap();
		assert_eq!(reverted.order_status, OrderStatus::Placed);
	}

	#[tokio::test]
	async fn forward_only_policy_rejects_and_leaves_state() {
		let repo = repository(TransitionPolicy::ForwardOnly);
		let order = place_order(&repo, submission("Asha", "111", None)).await;

		let advanced = repo
			.update_status(&order.id, OrderStatus::Packed)
			.await
			.unwrap();
		assert_eq!(advanced.order_status, OrderStatus::Packed);

		let result = repo.update_status(&order.id, OrderStatus::Placed).await;
		assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));

		let fetched = repo.get(&order.id).await.unwrap();
		assert_eq!(fetched.order_status, OrderStatus::Packed);
	}

	#[tokio::test]
	async fn unknown_order_id_is_an_update_failure() {
		let repo = repository(TransitionPolicy::Permissive);
		let result = repo.update_status("absent", OrderStatus::Packed).await;
		assert!(matches!(result, Err(OrderError::Storage(_))));
	}

	#[tokio::test]
	async fn empty_order_id_is_a_validation_failure() {
		let repo = repository(TransitionPolicy::Permissive);
		let result = repo.update_status("", OrderStatus::Packed).await;
		assert!(matches!(result, Err(OrderError::Validation(_))));
	}
}
