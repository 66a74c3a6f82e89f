//! Request extractors that guard handlers.
//!
//! - [`auth::ApiKey`] -- Requires the shared secret in the `X-API-Key` header.

pub mod auth;
