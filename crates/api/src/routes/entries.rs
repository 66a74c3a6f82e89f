//! Route definitions for the `/entries` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// GET    /                -> list_entries
/// POST   /                -> create_entry
/// POST   /search          -> search_entries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::list_entries).post(entries::create_entry))
        .route("/search", post(entries::search_entries))
}
