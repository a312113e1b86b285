//! SQLite storage backend for the ordering service.
//!
//! Persists orders in a single local database file. Write-ahead logging is
//! enabled so readers are not blocked while a write is in flight; the engine
//! itself serializes writes (single writer, many readers).

use crate::{OrderStore, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use ordering_types::{NewOrder, Order, OrderChanges, DEFAULT_STATUS};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Idempotent schema migration. There is no schema versioning beyond the
/// existence check; required-field enforcement lives at the API boundary, so
/// the columns stay plain TEXT.
const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	name TEXT,
	phone TEXT,
	email TEXT,
	product TEXT,
	details TEXT,
	status TEXT DEFAULT 'pending',
	created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

const ORDER_COLUMNS: &str = "id, name, phone, email, product, details, status, created_at";

/// SQLite-backed order store.
pub struct SqliteStore {
	/// Connection pool over the database file.
	pool: SqlitePool,
}

impl SqliteStore {
	/// Opens (creating if missing) the database file at `path` in WAL mode
	/// and runs the schema migration.
	pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
		let options = SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(SqliteJournalMode::Wal);

		let pool = SqlitePool::connect_with(options).await?;
		Self::with_pool(pool).await
	}

	/// Opens an in-memory database for tests and development.
	///
	/// The pool is pinned to a single connection that never expires: a pooled
	/// `:memory:` database is otherwise one private database per connection.
	pub async fn in_memory() -> Result<Self, StorageError> {
		let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.min_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect_with(options)
			.await?;
		Self::with_pool(pool).await
	}

	async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
		let store = Self { pool };
		store.migrate().await?;
		Ok(store)
	}

	/// Creates the orders table if absent.
	async fn migrate(&self) -> Result<(), StorageError> {
		sqlx::query(CREATE_ORDERS_TABLE).execute(&self.pool).await?;
		tracing::debug!("orders table ready");
		Ok(())
	}
}

#[async_trait]
impl OrderStore for SqliteStore {
	async fn insert(&self, order: NewOrder) -> Result<Order, StorageError> {
		let created = sqlx::query_as::<_, Order>(&format!(
			"INSERT INTO orders (name, phone, email, product, details, status, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
			ORDER_COLUMNS
		))
		.bind(&order.name)
		.bind(&order.phone)
		.bind(&order.email)
		.bind(&order.product)
		.bind(&order.details)
		.bind(DEFAULT_STATUS)
		.bind(Utc::now())
		.fetch_one(&self.pool)
		.await?;

		Ok(created)
	}

	async fn list_all(&self) -> Result<Vec<Order>, StorageError> {
		// The id tiebreak keeps newest-first deterministic when two rows
		// share a timestamp; ids are monotonic so it agrees with insertion
		// order.
		let orders = sqlx::query_as::<_, Order>(&format!(
			"SELECT {} FROM orders ORDER BY created_at DESC, id DESC",
			ORDER_COLUMNS
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(orders)
	}

	async fn get_by_id(&self, id: i64) -> Result<Order, StorageError> {
		sqlx::query_as::<_, Order>(&format!(
			"SELECT {} FROM orders WHERE id = ?",
			ORDER_COLUMNS
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?
		.ok_or(StorageError::NotFound)
	}

	async fn update(&self, id: i64, changes: OrderChanges) -> Result<Order, StorageError> {
		// Read first so a missing row fails before any write is attempted.
		let mut order = self.get_by_id(id).await?;

		if let Some(status) = changes.status {
			order.status = status;
		}
		if let Some(details) = changes.details {
			order.details = details;
		}

		sqlx::query("UPDATE orders SET status = ?, details = ? WHERE id = ?")
			.bind(&order.status)
			.bind(&order.details)
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(order)
	}

	async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
		// Unconditional: a delete that matched no row is still success.
		sqlx::query("DELETE FROM orders WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(())
	}
}
