//! Handlers for the `/jobs` resource.
//!
//! All endpoints require [`ApiKey`]. Every lookup is scoped by the
//! caller-supplied `user_id`; a job owned by someone else is reported as
//! not found.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jobdiary_core::error::CoreError;
use jobdiary_core::job_status::is_known_status;
use jobdiary_core::types::{DbId, Timestamp};
use jobdiary_db::models::job::{CreateJob, JobListQuery, JobStateUpdate, OwnerQuery, UpdateJob};
use jobdiary_db::repositories::JobRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::auth::ApiKey;
use crate::state::AppState;

/// Response body of `POST /jobs/{id}/state`.
#[derive(Debug, Serialize)]
pub struct JobStateUpdated {
    pub ok: bool,
    pub updated_at: Timestamp,
}

fn job_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Job", id })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /jobs
///
/// Create a job in `in_progress` status with empty state. Returns 201 with
/// the job and a `Location` header.
pub async fn create_job(
    _auth: ApiKey,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateJob>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let job = JobRepo::create(&state.pool, &input).await?;

    tracing::info!(job_id = %job.id, user_id = %job.user_id, "Job created");

    let location = state.config.resource_url(&format!("/jobs/{}", job.id));
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(job)))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /jobs?user_id=&limit=
///
/// List the user's jobs, most recently updated first.
pub async fn list_jobs(
    _auth: ApiKey,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;

    let jobs = JobRepo::list_by_user(&state.pool, &params.user_id, params.limit()).await?;
    Ok(Json(jobs))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /jobs/{id}?user_id=
pub async fn get_job(
    _auth: ApiKey,
    State(state): State<AppState>,
    PathParam(job_id): PathParam<DbId>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> AppResult<impl IntoResponse> {
    owner.validate()?;

    let job = JobRepo::find_by_id(&state.pool, &owner.user_id, job_id)
        .await?
        .ok_or_else(|| job_not_found(job_id))?;
    Ok(Json(job))
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PATCH /jobs/{id}?user_id=
///
/// Apply the fields present in the body; omitted fields are left alone.
pub async fn update_job(
    _auth: ApiKey,
    State(state): State<AppState>,
    PathParam(job_id): PathParam<DbId>,
    QueryParams(owner): QueryParams<OwnerQuery>,
    JsonBody(input): JsonBody<UpdateJob>,
) -> AppResult<impl IntoResponse> {
    owner.validate()?;
    input.validate()?;

    if let Some(status) = input.status.as_deref().filter(|s| !is_known_status(s)) {
        tracing::warn!(%job_id, status, "Job set to an undocumented status");
    }

    let job = JobRepo::update(&state.pool, &owner.user_id, job_id, &input)
        .await?
        .ok_or_else(|| job_not_found(job_id))?;

    tracing::info!(%job_id, user_id = %owner.user_id, status = %job.status, "Job updated");

    Ok(Json(job))
}

// ---------------------------------------------------------------------------
// State patch
// ---------------------------------------------------------------------------

/// POST /jobs/{id}/state?user_id=
///
/// Shallow-merge `patch` into the job's state map.
pub async fn update_job_state(
    _auth: ApiKey,
    State(state): State<AppState>,
    PathParam(job_id): PathParam<DbId>,
    QueryParams(owner): QueryParams<OwnerQuery>,
    JsonBody(input): JsonBody<JobStateUpdate>,
) -> AppResult<impl IntoResponse> {
    owner.validate()?;

    let keys: Vec<String> = input.patch.keys().cloned().collect();

    let job = JobRepo::update_state(&state.pool, &owner.user_id, job_id, input.patch)
        .await?
        .ok_or_else(|| job_not_found(job_id))?;

    tracing::info!(
        %job_id,
        user_id = %owner.user_id,
        ?keys,
        reason = input.reason.as_deref().unwrap_or(""),
        "Job state patched"
    );

    Ok(Json(JobStateUpdated {
        ok: true,
        updated_at: job.updated_at,
    }))
}
