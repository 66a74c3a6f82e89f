//! Handlers for the `/entries` resource.
//!
//! Entries are reached through their parent job; a job that is missing or
//! owned by someone else yields 404 on create and an empty list on reads.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jobdiary_db::models::entry::{
    CreateEntry, EntryListItem, EntryListQuery, EntrySearchHit, SearchEntries,
};
use jobdiary_db::repositories::EntryRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::ApiKey;
use crate::state::AppState;

/// POST /entries
///
/// Record a diary entry against a job. Returns 201 with the full entry, or
/// 404 when the job does not belong to `user_id`.
pub async fn create_entry(
    _auth: ApiKey,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateEntry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let entry = EntryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        entry_id = %entry.id,
        job_id = %entry.job_id,
        user_id = %entry.user_id,
        "Entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /entries?user_id=&job_id=&limit=
///
/// Newest entries first, without transcripts.
pub async fn list_entries(
    _auth: ApiKey,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<EntryListQuery>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;

    let entries =
        EntryRepo::list_by_job(&state.pool, &params.user_id, params.job_id, params.limit())
            .await?;

    let items: Vec<EntryListItem> = entries.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

/// POST /entries/search
///
/// Case-insensitive substring match over transcript and summary.
pub async fn search_entries(
    _auth: ApiKey,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SearchEntries>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let entries = EntryRepo::search(
        &state.pool,
        &input.user_id,
        input.job_id,
        &input.query,
        input.limit(),
    )
    .await?;

    tracing::debug!(
        job_id = %input.job_id,
        hits = entries.len(),
        "Entry search"
    );

    let hits: Vec<EntrySearchHit> = entries.into_iter().map(Into::into).collect();
    Ok(Json(hits))
}
