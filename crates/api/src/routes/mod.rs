pub mod debrief;
pub mod entries;
pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the authenticated route tree.
///
/// Route hierarchy:
///
/// ```text
/// /jobs                      list, create
/// /jobs/{id}                 get, partial update
/// /jobs/{id}/state           shallow-merge state patch (POST)
///
/// /entries                   list (reduced view), create
/// /entries/search            substring search (POST)
///
/// /debrief                   find-or-create job + entry + state patch (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/jobs", jobs::router())
        .nest("/entries", entries::router())
        .merge(debrief::router())
}
