//! Repository for the `jobs` table.

use jobdiary_core::job_state::merge_state;
use jobdiary_core::job_status::DEFAULT_STATUS;
use jobdiary_core::types::{DbId, StateMap};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, UpdateJob};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, address, client_name, status, job_state, created_at, updated_at";

/// Provides owner-scoped CRUD operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job, returning the created row.
    ///
    /// Status starts at `in_progress` and `job_state` at `{}`. Names are not
    /// unique.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (id, user_id, name, address, client_name, status, job_state)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(DbId::new_v4())
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.client_name)
            .bind(DEFAULT_STATUS)
            .bind(Json(StateMap::new()))
            .fetch_one(pool)
            .await
    }

    /// Find a job by id, only if it belongs to `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a job by exact name. When several jobs share the name, the oldest
    /// one wins.
    pub async fn find_by_name(
        pool: &PgPool,
        user_id: &str,
        name: &str,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs
             WHERE user_id = $1 AND name = $2
             ORDER BY created_at ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List a user's jobs, most recently touched first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs
             WHERE user_id = $1
             ORDER BY updated_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a job. Only non-`None` fields in `input` are applied; omitted
    /// fields keep their current value. Always refreshes `updated_at`.
    ///
    /// Returns `None` if no job with `id` belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                status = COALESCE($3, status),
                name = COALESCE($4, name),
                address = COALESCE($5, address),
                client_name = COALESCE($6, client_name),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.status)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.client_name)
            .fetch_optional(pool)
            .await
    }

    /// Shallow-merge `patch` into the job's state map and refresh `updated_at`.
    ///
    /// This is a read-modify-write with no concurrency token: two patches
    /// racing on the same job can lose one of the writes (last writer wins).
    ///
    /// Returns `None` if no job with `id` belongs to `user_id`.
    pub async fn update_state(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
        patch: StateMap,
    ) -> Result<Option<Job>, sqlx::Error> {
        let Some(job) = Self::find_by_id(pool, user_id, id).await? else {
            return Ok(None);
        };

        tracing::debug!(job_id = %id, keys = patch.len(), "Merging job state patch");

        let Json(mut state) = job.job_state;
        merge_state(&mut state, patch);

        let query = format!(
            "UPDATE jobs SET job_state = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(user_id)
            .bind(Json(state))
            .fetch_optional(pool)
            .await
    }
}
