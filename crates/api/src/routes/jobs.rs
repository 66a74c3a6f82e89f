//! Route definitions for the `/jobs` resource.
//!
//! All endpoints require the API key.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                -> list_jobs
/// POST   /                -> create_job
/// GET    /{id}            -> get_job
/// PATCH  /{id}            -> update_job
/// POST   /{id}/state      -> update_job_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::create_job))
        .route("/{id}", get(jobs::get_job).patch(jobs::update_job))
        .route("/{id}/state", post(jobs::update_job_state))
}
