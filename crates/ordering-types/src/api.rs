//! API types for the ordering HTTP API.
//!
//! This module defines the request and response types for the order
//! endpoints, together with the error taxonomy every handler maps into.

use crate::Order;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for creating an order.
///
/// Every field is optional at the wire level so the handler can distinguish
/// an absent field from an empty one; `name`, `phone` and `product` must end
/// up non-empty for the request to be accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
	pub name: Option<String>,
	pub phone: Option<String>,
	pub email: Option<String>,
	pub product: Option<String>,
	pub details: Option<String>,
}

/// Request body for partially updating an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
	pub status: Option<String>,
	pub details: Option<String>,
}

/// Response wrapping a single order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
	pub order: Order,
}

/// Response wrapping the full order listing, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
	pub orders: Vec<Order>,
}

/// Response for order deletion. Always successful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub success: bool,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Human-readable description.
	pub error: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Request failed validation (400).
	#[error("{0}")]
	BadRequest(String),
	/// Missing or incorrect admin token (401).
	#[error("Unauthorized")]
	Unauthorized,
	/// Requested resource does not exist (404).
	#[error("{0}")]
	NotFound(String),
	/// Unhandled failure, typically a storage fault (500).
	#[error("{0}")]
	Internal(String),
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest(_) => 400,
			ApiError::Unauthorized => 401,
			ApiError::NotFound(_) => 404,
			ApiError::Internal(_) => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		ErrorResponse {
			error: self.to_string(),
		}
	}
}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		(status, Json(self.to_error_response())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_codes() {
		assert_eq!(ApiError::BadRequest("Missing fields".into()).status_code(), 400);
		assert_eq!(ApiError::Unauthorized.status_code(), 401);
		assert_eq!(ApiError::NotFound("Order not found".into()).status_code(), 404);
		assert_eq!(ApiError::Internal("db gone".into()).status_code(), 500);
	}

	#[test]
	fn test_error_response_body() {
		let body = ApiError::Unauthorized.to_error_response();
		assert_eq!(body.error, "Unauthorized");

		let body = ApiError::NotFound("Order not found".into()).to_error_response();
		assert_eq!(body.error, "Order not found");
	}

	#[test]
	fn test_update_request_distinguishes_absent_fields() {
		let req: UpdateOrderRequest = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
		assert_eq!(req.status.as_deref(), Some("done"));
		assert!(req.details.is_none());

		let req: UpdateOrderRequest = serde_json::from_str("{}").unwrap();
		assert!(req.status.is_none());
		assert!(req.details.is_none());
	}
}
