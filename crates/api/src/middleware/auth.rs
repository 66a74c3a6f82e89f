//! Shared-secret authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jobdiary_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared API secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured `X-API-Key`.
///
/// The key authenticates the calling application, not an end user: the
/// `user_id` each request supplies is trusted as given.
///
/// ```ignore
/// async fn my_handler(_auth: ApiKey, State(state): State<AppState>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(API_KEY_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-API-Key header".into()))
            })?;

        if header.as_bytes() != state.config.api_key.as_bytes() {
            tracing::warn!("Rejected request with invalid API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(ApiKey)
    }
}
