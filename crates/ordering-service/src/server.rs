//! HTTP server for the ordering API.
//!
//! Builds the application router (JSON API under `/api`, bundled front-end
//! for everything else) and runs it on the configured address.

use axum::{
	routing::{get, post},
	Router,
};
use ordering_config::Config;
use ordering_storage::OrderStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::apis::orders;

/// Shared application state for the API server.
///
/// Constructed once at startup and injected into every handler; there is no
/// other cross-request state.
#[derive(Clone)]
pub struct AppState {
	/// Order storage backend.
	pub store: Arc<dyn OrderStore>,
	/// Complete configuration.
	pub config: Config,
}

/// Builds the application router.
///
/// API routes are claimed under `/api`; any other path is served from the
/// front-end directory, falling back to the index page so client-side routes
/// resolve.
pub fn router(state: AppState) -> Router {
	let static_dir = PathBuf::from(&state.config.static_files.directory);
	let front_end =
		ServeDir::new(&static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

	Router::new()
		.nest(
			"/api",
			Router::new()
				.route(
					"/orders",
					post(orders::create_order).get(orders::list_orders),
				)
				.route(
					"/orders/{id}",
					get(orders::get_order)
						.put(orders::update_order)
						.delete(orders::delete_order),
				),
		)
		.fallback_service(front_end)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	config: Config,
	store: Arc<dyn OrderStore>,
) -> Result<(), Box<dyn std::error::Error>> {
	let bind_address = format!("{}:{}", config.api.host, config.api.port);
	let app = router(AppState { store, config });

	let listener = TcpListener::bind(&bind_address).await?;
	tracing::info!("Ordering API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::ADMIN_TOKEN_HEADER;
	use axum::body::{to_bytes, Body};
	use axum::http::{header, Request, StatusCode};
	use ordering_storage::implementations::memory::MemoryStore;
	use ordering_types::{DeleteResponse, ErrorResponse, OrderResponse, OrdersResponse};
	use serde_json::json;
	use tower::ServiceExt;

	const TOKEN: &str = "changeme123";

	/// Router over an empty in-memory store, with the front-end served from a
	/// temp directory holding a recognizable index page.
	fn test_app() -> (Router, tempfile::TempDir) {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("index.html"), "<html>front-end</html>").unwrap();

		let mut config = Config::default();
		config.static_files.directory = dir.path().to_str().unwrap().to_string();

		let app = router(AppState {
			store: Arc::new(MemoryStore::new()),
			config,
		});
		(app, dir)
	}

	fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
		let mut builder = Request::builder()
			.method(method)
			.uri(uri)
			.header(header::CONTENT_TYPE, "application/json");
		if let Some(token) = token {
			builder = builder.header(ADMIN_TOKEN_HEADER, token);
		}
		builder
			.body(Body::from(serde_json::to_vec(&body).unwrap()))
			.unwrap()
	}

	fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
		let mut builder = Request::builder().method(method).uri(uri);
		if let Some(token) = token {
			builder = builder.header(ADMIN_TOKEN_HEADER, token);
		}
		builder.body(Body::empty()).unwrap()
	}

	async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	#[tokio::test]
	async fn test_create_then_manage_order() {
		let (app, _dir) = test_app();

		// Public submission.
		let response = app
			.clone()
			.oneshot(json_request(
				"POST",
				"/api/orders",
				None,
				json!({"name": "A", "phone": "123", "product": "Tea"}),
			))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let created: OrderResponse = body_json(response).await;
		assert_eq!(created.order.id, 1);
		assert_eq!(created.order.status, "pending");

		// Admin updates the status.
		let response = app
			.clone()
			.oneshot(json_request(
				"PUT",
				"/api/orders/1",
				Some(TOKEN),
				json!({"status": "done"}),
			))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let updated: OrderResponse = body_json(response).await;
		assert_eq!(updated.order.status, "done");

		// Admin deletes it.
		let response = app
			.clone()
			.oneshot(bare_request("DELETE", "/api/orders/1", Some(TOKEN)))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let deleted: DeleteResponse = body_json(response).await;
		assert!(deleted.success);

		// It is gone.
		let response = app
			.oneshot(bare_request("GET", "/api/orders/1", Some(TOKEN)))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		let error: ErrorResponse = body_json(response).await;
		assert_eq!(error.error, "Order not found");
	}

	#[tokio::test]
	async fn test_create_with_missing_fields_is_rejected() {
		let (app, _dir) = test_app();

		let response = app
			.clone()
			.oneshot(json_request(
				"POST",
				"/api/orders",
				None,
				json!({"name": "A", "phone": "123"}),
			))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		let error: ErrorResponse = body_json(response).await;
		assert_eq!(error.error, "Missing fields");

		// No row was created.
		let response = app
			.oneshot(bare_request("GET", "/api/orders", Some(TOKEN)))
			.await
			.unwrap();
		let listing: OrdersResponse = body_json(response).await;
		assert!(listing.orders.is_empty());
	}

	#[tokio::test]
	async fn test_admin_routes_reject_bad_or_missing_token() {
		let (app, _dir) = test_app();

		// Seed one order so a mutation would be observable.
		app.clone()
			.oneshot(json_request(
				"POST",
				"/api/orders",
				None,
				json!({"name": "A", "phone": "123", "product": "Tea"}),
			))
			.await
			.unwrap();

		let attempts = [
			bare_request("GET", "/api/orders", None),
			bare_request("GET", "/api/orders/1", Some("wrong")),
			json_request("PUT", "/api/orders/1", None, json!({"status": "done"})),
			bare_request("DELETE", "/api/orders/1", Some("wrong")),
		];
		for request in attempts {
			let response = app.clone().oneshot(request).await.unwrap();
			assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
			let error: ErrorResponse = body_json(response).await;
			assert_eq!(error.error, "Unauthorized");
		}

		// The order is untouched.
		let response = app
			.oneshot(bare_request("GET", "/api/orders/1", Some(TOKEN)))
			.await
			.unwrap();
		let fetched: OrderResponse = body_json(response).await;
		assert_eq!(fetched.order.status, "pending");
	}

	#[tokio::test]
	async fn test_listing_is_newest_first() {
		let (app, _dir) = test_app();

		for name in ["first", "second", "third"] {
			app.clone()
				.oneshot(json_request(
					"POST",
					"/api/orders",
					None,
					json!({"name": name, "phone": "123", "product": "Tea"}),
				))
				.await
				.unwrap();
			tokio::time::sleep(std::time::Duration::from_millis(5)).await;
		}

		let response = app
			.oneshot(bare_request("GET", "/api/orders", Some(TOKEN)))
			.await
			.unwrap();
		let listing: OrdersResponse = body_json(response).await;
		let names: Vec<_> = listing.orders.iter().map(|o| o.name.as_str()).collect();
		assert_eq!(names, ["third", "second", "first"]);
	}

	#[tokio::test]
	async fn test_unmatched_routes_serve_front_end_index() {
		let (app, _dir) = test_app();

		for uri in ["/", "/admin", "/some/client/route"] {
			let response = app
				.clone()
				.oneshot(bare_request("GET", uri, None))
				.await
				.unwrap();
			assert_eq!(response.status(), StatusCode::OK);

			let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
			assert_eq!(&bytes[..], b"<html>front-end</html>".as_slice());
		}
	}
}
