//! Order API handlers.
//!
//! Five operations over the order store: public creation plus admin-gated
//! list, get, update and delete. Handlers stay thin; persistence semantics
//! live in the storage layer.

use axum::extract::{Path, State};
use axum::response::Json;
use ordering_types::{
	ApiError, CreateOrderRequest, DeleteResponse, NewOrder, OrderChanges, OrderResponse,
	OrdersResponse, UpdateOrderRequest,
};
use tracing::{info, warn};

use crate::auth::AdminToken;
use crate::server::AppState;

/// Parses an order id from its path segment.
///
/// A non-numeric segment matches no row, so it is answered exactly like an
/// unknown id rather than as a malformed request.
fn parse_order_id(raw: &str) -> Result<i64, ApiError> {
	raw.parse()
		.map_err(|_| ApiError::NotFound("Order not found".to_string()))
}

/// Handles POST /api/orders requests. Public.
///
/// `name`, `phone` and `product` must be present and non-empty; `email` and
/// `details` default to empty strings. On missing required fields nothing is
/// written.
pub async fn create_order(
	State(state): State<AppState>,
	Json(body): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
	let name = body.name.unwrap_or_default();
	let phone = body.phone.unwrap_or_default();
	let product = body.product.unwrap_or_default();

	if name.is_empty() || phone.is_empty() || product.is_empty() {
		warn!("Rejected order submission with missing fields");
		return Err(ApiError::BadRequest("Missing fields".to_string()));
	}

	let order = state
		.store
		.insert(NewOrder {
			name,
			phone,
			email: body.email.unwrap_or_default(),
			product,
			details: body.details.unwrap_or_default(),
		})
		.await?;

	info!(id = order.id, "Order created");
	Ok(Json(OrderResponse { order }))
}

/// Handles GET /api/orders requests. Admin only. Newest first.
pub async fn list_orders(
	_admin: AdminToken,
	State(state): State<AppState>,
) -> Result<Json<OrdersResponse>, ApiError> {
	let orders = state.store.list_all().await?;
	Ok(Json(OrdersResponse { orders }))
}

/// Handles GET /api/orders/{id} requests. Admin only.
pub async fn get_order(
	_admin: AdminToken,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
	let id = parse_order_id(&id)?;
	let order = state.store.get_by_id(id).await?;
	Ok(Json(OrderResponse { order }))
}

/// Handles PUT /api/orders/{id} requests. Admin only.
///
/// Coalesce-style partial update: only supplied fields change, and supplying
/// neither field returns the row unchanged. An unknown id fails with 404
/// before any write.
pub async fn update_order(
	_admin: AdminToken,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(body): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
	let id = parse_order_id(&id)?;
	let order = state
		.store
		.update(
			id,
			OrderChanges {
				status: body.status,
				details: body.details,
			},
		)
		.await?;

	info!(id = order.id, status = %order.status, "Order updated");
	Ok(Json(OrderResponse { order }))
}

/// Handles DELETE /api/orders/{id} requests. Admin only.
///
/// Always succeeds: absence of the target row, including an unparseable id,
/// is trivial success rather than an error.
pub async fn delete_order(
	_admin: AdminToken,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
	if let Ok(id) = id.parse::<i64>() {
		state.store.delete_by_id(id).await?;
		info!(id, "Order deleted");
	}

	Ok(Json(DeleteResponse { success: true }))
}
