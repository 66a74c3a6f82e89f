//! Job entity model and DTOs.

use jobdiary_core::search::DEFAULT_JOB_LIMIT;
use jobdiary_core::types::{DbId, StateMap, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub address: Option<String>,
    pub client_name: Option<String>,
    pub status: String,
    pub job_state: Json<StateMap>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /jobs`. New jobs always start `in_progress` with empty state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    pub name: String,
    pub address: Option<String>,
    pub client_name: Option<String>,
}

/// DTO for `PATCH /jobs/{id}`. Only fields that are present are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJob {
    /// One of `quoted`, `in_progress`, `complete`, `on_hold` (not enforced).
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub client_name: Option<String>,
}

/// Body of `POST /jobs/{id}/state`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStateUpdate {
    /// Merged into `job_state` key by key.
    pub patch: StateMap,
    /// Free-text note for the logs; not persisted.
    pub reason: Option<String>,
}

/// Owner query parameter shared by the single-job endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct OwnerQuery {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
}

/// Query parameters for `GET /jobs`.
#[derive(Debug, Deserialize, Validate)]
pub struct JobListQuery {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    /// Defaults to 20; must be within 1..=100.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl JobListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_JOB_LIMIT)
    }
}
