//! In-memory storage backend for the ordering service.
//!
//! Keeps orders in a lock-guarded vector with its own monotonic id counter.
//! Useful for tests and development scenarios where persistence is not
//! required; nothing survives a restart.

use crate::{OrderStore, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use ordering_types::{NewOrder, Order, OrderChanges, DEFAULT_STATUS};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory order store.
pub struct MemoryStore {
	inner: Arc<RwLock<MemoryInner>>,
}

struct MemoryInner {
	/// Next id to assign. Never reused, even after deletes.
	next_id: i64,
	orders: Vec<Order>,
}

impl MemoryStore {
	/// Creates a new, empty MemoryStore.
	pub fn new() -> Self {
		Self {
			inner: Arc::new(RwLock::new(MemoryInner {
				next_id: 1,
				orders: Vec::new(),
			})),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl OrderStore for MemoryStore {
	async fn insert(&self, order: NewOrder) -> Result<Order, StorageError> {
		let mut inner = self.inner.write().await;
		let id = inner.next_id;
		inner.next_id += 1;

		let order = Order {
			id,
			name: order.name,
			phone: order.phone,
			email: order.email,
			product: order.product,
			details: order.details,
			status: DEFAULT_STATUS.to_string(),
			created_at: Utc::now(),
		};
		inner.orders.push(order.clone());

		Ok(order)
	}

	async fn list_all(&self) -> Result<Vec<Order>, StorageError> {
		let inner = self.inner.read().await;
		let mut orders = inner.orders.clone();
		orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
		Ok(orders)
	}

	async fn get_by_id(&self, id: i64) -> Result<Order, StorageError> {
		let inner = self.inner.read().await;
		inner
			.orders
			.iter()
			.find(|order| order.id == id)
			.cloned()
			.ok_or(StorageError::NotFound)
	}

	async fn update(&self, id: i64, changes: OrderChanges) -> Result<Order, StorageError> {
		let mut inner = self.inner.write().await;
		let order = inner
			.orders
			.iter_mut()
			.find(|order| order.id == id)
			.ok_or(StorageError::NotFound)?;

		if let Some(status) = changes.status {
			order.status = status;
		}
		if let Some(details) = changes.details {
			order.details = details;
		}

		Ok(order.clone())
	}

	async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
		let mut inner = self.inner.write().await;
		inner.orders.retain(|order| order.id != id);
		Ok(())
	}
}
