use axum::routing::post;
use axum::Router;

use crate::handlers::debrief;
use crate::state::AppState;

/// `POST /debrief` -> create_debrief
pub fn router() -> Router<AppState> {
    Router::new().route("/debrief", post(debrief::create_debrief))
}
