//! Repository for the `entries` table.
//!
//! Entries are always reached through their parent job: every statement
//! checks that the job exists and belongs to the caller.

use jobdiary_core::search::{substring_pattern, LIKE_ESCAPE};
use jobdiary_core::types::{DbId, StateMap};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::entry::{CreateEntry, Entry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, job_id, user_id, entry_ts, transcript, extracted, summary, created_at";

/// Restricts a query to jobs owned by the caller. Expects the job id in `$1`
/// and the user id in `$2`.
const OWNED_JOB: &str = "EXISTS (SELECT 1 FROM jobs WHERE id = $1 AND user_id = $2)";

/// Provides owner-scoped operations for diary entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert an entry under a job owned by `input.user_id`.
    ///
    /// The ownership check and the insert are one statement, so a missing or
    /// foreign job writes nothing and yields [`RepoError::JobNotFound`].
    pub async fn create(pool: &PgPool, input: &CreateEntry) -> Result<Entry, RepoError> {
        let query = format!(
            "INSERT INTO entries (id, job_id, user_id, entry_ts, transcript, extracted, summary)
             SELECT $3, j.id, j.user_id, COALESCE($4, NOW()), $5, $6, $7
             FROM jobs j
             WHERE j.id = $1 AND j.user_id = $2
             RETURNING {COLUMNS}"
        );
        let extracted = input.extracted.clone().unwrap_or_default();

        sqlx::query_as::<_, Entry>(&query)
            .bind(input.job_id)
            .bind(&input.user_id)
            .bind(DbId::new_v4())
            .bind(input.entry_ts)
            .bind(&input.transcript)
            .bind(Json::<StateMap>(extracted))
            .bind(&input.summary)
            .fetch_optional(pool)
            .await?
            .ok_or(RepoError::JobNotFound {
                job_id: input.job_id,
            })
    }

    /// List a job's entries, newest `entry_ts` first.
    ///
    /// Returns an empty list when the job does not exist or belongs to
    /// someone else.
    pub async fn list_by_job(
        pool: &PgPool,
        user_id: &str,
        job_id: DbId,
        limit: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE job_id = $1 AND user_id = $2 AND {OWNED_JOB}
             ORDER BY entry_ts DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(job_id)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over transcript and summary.
    ///
    /// `query` is matched literally (no wildcards, no tokenization). An empty
    /// query matches nothing. Same ownership rules as [`Self::list_by_job`].
    pub async fn search(
        pool: &PgPool,
        user_id: &str,
        job_id: DbId,
        query_str: &str,
        limit: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let Some(pattern) = substring_pattern(query_str) else {
            tracing::debug!(%job_id, "Empty search query, nothing to match");
            return Ok(Vec::new());
        };

        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE job_id = $1 AND user_id = $2 AND {OWNED_JOB}
               AND (transcript ILIKE $3 ESCAPE '{LIKE_ESCAPE}'
                    OR summary ILIKE $3 ESCAPE '{LIKE_ESCAPE}')
             ORDER BY entry_ts DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(job_id)
            .bind(user_id)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
