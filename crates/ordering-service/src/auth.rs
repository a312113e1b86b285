//! Admin authorization for privileged order routes.
//!
//! A single static shared secret authorizes all admin operations. The gate is
//! binary allow/deny: no rate limiting, no lockout.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ordering_types::ApiError;

use crate::server::AppState;

/// Header carrying the shared admin secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor guarding admin-only handlers.
///
/// Compares the `x-admin-token` header against the configured secret; a
/// missing header compares as the empty string. On mismatch the request is
/// rejected with 401 before any handler logic runs.
pub struct AdminToken;

impl FromRequestParts<AppState> for AdminToken {
	type Rejection = ApiError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let supplied = parts
			.headers
			.get(ADMIN_TOKEN_HEADER)
			.and_then(|value| value.to_str().ok())
			.unwrap_or("");

		if supplied != state.config.admin.token {
			tracing::warn!("Rejected admin request with bad or missing token");
			return Err(ApiError::Unauthorized);
		}

		Ok(AdminToken)
	}
}
