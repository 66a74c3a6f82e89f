//! Handler for `POST /debrief`.
//!
//! A debrief resolves (or creates) the target job, records the transcript as
//! an entry and stamps the job's state with the debrief time and a short
//! summary. The steps are not wrapped in a transaction: a job created while
//! resolving survives a later failure.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use jobdiary_core::debrief::{parse_job_id, state_patch};
use jobdiary_core::error::CoreError;
use jobdiary_db::error::RepoError;
use jobdiary_db::models::debrief::{CreateDebrief, DebriefResponse};
use jobdiary_db::models::entry::CreateEntry;
use jobdiary_db::models::job::{CreateJob, Job};
use jobdiary_db::repositories::{EntryRepo, JobRepo};
use jobdiary_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::ApiKey;
use crate::state::AppState;

/// POST /debrief
pub async fn create_debrief(
    _auth: ApiKey,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateDebrief>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let job = resolve_job(&state.pool, &input.user_id, &input.job_name_or_id).await?;

    let entry = EntryRepo::create(
        &state.pool,
        &CreateEntry {
            user_id: input.user_id.clone(),
            job_id: job.id,
            transcript: input.transcript.clone(),
            extracted: None,
            summary: None,
            entry_ts: None,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::JobNotFound { job_id } => {
            AppError::BadRequest(format!("Could not record entry: job {job_id} is gone"))
        }
        RepoError::Database(e) => AppError::Database(e),
    })?;

    let patch = state_patch(&input.transcript, Utc::now());
    let job = JobRepo::update_state(&state.pool, &input.user_id, job.id, patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Job",
            id: job.id,
        })?;

    tracing::info!(
        job_id = %job.id,
        entry_id = %entry.id,
        user_id = %input.user_id,
        "Debrief recorded"
    );

    Ok((StatusCode::CREATED, Json(DebriefResponse { job, entry })))
}

/// Pick the job a debrief targets: an owned job by id, then an owned job by
/// exact name, then a freshly created job named after the input.
async fn resolve_job(pool: &DbPool, user_id: &str, job_name_or_id: &str) -> AppResult<Job> {
    if let Some(id) = parse_job_id(job_name_or_id) {
        if let Some(job) = JobRepo::find_by_id(pool, user_id, id).await? {
            return Ok(job);
        }
    }

    if let Some(job) = JobRepo::find_by_name(pool, user_id, job_name_or_id).await? {
        return Ok(job);
    }

    let job = JobRepo::create(
        pool,
        &CreateJob {
            user_id: user_id.to_string(),
            name: job_name_or_id.to_string(),
            address: None,
            client_name: None,
        },
    )
    .await?;

    tracing::info!(job_id = %job.id, user_id, name = %job.name, "Job created by debrief");

    Ok(job)
}
