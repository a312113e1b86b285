//! Order domain types.
//!
//! An order is the sole entity of the system: created by a public submission,
//! read and partially updated by admin callers, and hard-deleted on request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status assigned to every newly created order.
pub const DEFAULT_STATUS: &str = "pending";

/// A persisted customer order.
///
/// `id` and `created_at` are assigned by storage at insertion time and never
/// change afterwards. `status` and `details` are the only mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
	/// Unique, monotonically increasing identifier.
	pub id: i64,
	/// Customer name.
	pub name: String,
	/// Customer phone number.
	pub phone: String,
	/// Customer email, empty when not supplied.
	pub email: String,
	/// Product being ordered.
	pub product: String,
	/// Free-form order details, empty when not supplied.
	pub details: String,
	/// Processing status, `"pending"` at creation.
	pub status: String,
	/// Creation timestamp, set once at insert.
	pub created_at: DateTime<Utc>,
}

/// A validated order submission, ready for insertion.
///
/// Required-field presence is checked at the API boundary before this type is
/// constructed; optional fields have already been defaulted to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
	pub name: String,
	pub phone: String,
	pub email: String,
	pub product: String,
	pub details: String,
}

/// A partial update to an existing order.
///
/// Each field is applied only when supplied; `None` leaves the stored value
/// unchanged. Supplying neither field is a valid, no-op update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderChanges {
	pub status: Option<String>,
	pub details: Option<String>,
}

impl OrderChanges {
	/// Returns true when no field would change.
	pub fn is_empty(&self) -> bool {
		self.status.is_none() && self.details.is_none()
	}
}
