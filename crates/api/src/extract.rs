//! Request extractors whose rejections use the JSON error body.
//!
//! axum's own `Query`, `Path` and `Json` reject malformed input with a
//! plain-text 400/415/422. These wrappers route the rejection through
//! [`AppError`], so a missing `user_id`, a non-UUID id or a broken JSON body
//! comes back as 422 `VALIDATION_ERROR` like every other invalid input.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// Query string deserialized into `T`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Path parameters deserialized into `T`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// JSON request body deserialized into `T`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
