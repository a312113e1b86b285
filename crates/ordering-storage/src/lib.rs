//! Storage module for the ordering system.
//!
//! This module provides the abstraction for persistent storage of orders,
//! supporting different backend implementations. The SQLite backend is the
//! durable default; the in-memory backend exists for tests and development.

use async_trait::async_trait;
use ordering_types::{ApiError, NewOrder, Order, OrderChanges};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
	pub mod sqlite;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested order is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs in the database engine.
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),
	/// Error that occurs in the storage backend configuration.
	#[error("Backend error: {0}")]
	Backend(String),
}

impl From<StorageError> for ApiError {
	fn from(err: StorageError) -> Self {
		match err {
			StorageError::NotFound => ApiError::NotFound("Order not found".to_string()),
			other => ApiError::Internal(other.to_string()),
		}
	}
}

/// Trait defining the interface for order storage backends.
///
/// This trait must be implemented by any storage backend that wants to
/// integrate with the ordering service. Implementations assign ids and
/// creation timestamps on insert and serialize their own writes.
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Inserts a new order, assigning its id, status and creation timestamp.
	/// Returns the full stored row.
	async fn insert(&self, order: NewOrder) -> Result<Order, StorageError>;

	/// Returns all orders, newest first.
	async fn list_all(&self) -> Result<Vec<Order>, StorageError>;

	/// Retrieves an order by id.
	async fn get_by_id(&self, id: i64) -> Result<Order, StorageError>;

	/// Applies a partial update to an order and returns the updated row.
	///
	/// Only fields supplied in `changes` are written; omitted fields keep
	/// their stored values. Fails with [`StorageError::NotFound`] before any
	/// write when the order does not exist.
	async fn update(&self, id: i64, changes: OrderChanges) -> Result<Order, StorageError>;

	/// Deletes an order by id.
	///
	/// Idempotent and unconditional: deleting an id that does not exist is
	/// success, not an error.
	async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;
}
