//! Entry entity model, DTOs and response projections.

use jobdiary_core::search::{DEFAULT_ENTRY_LIMIT, DEFAULT_SEARCH_LIMIT};
use jobdiary_core::types::{DbId, StateMap, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub job_id: DbId,
    pub user_id: String,
    pub entry_ts: Timestamp,
    pub transcript: String,
    pub extracted: Json<StateMap>,
    pub summary: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for `POST /entries`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEntry {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    pub job_id: DbId,
    pub transcript: String,
    /// Defaults to `{}`.
    pub extracted: Option<StateMap>,
    pub summary: Option<String>,
    /// Defaults to the time of insertion. May be backdated.
    pub entry_ts: Option<Timestamp>,
}

/// Query parameters for `GET /entries`.
#[derive(Debug, Deserialize, Validate)]
pub struct EntryListQuery {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    pub job_id: DbId,
    /// Defaults to 20; must be within 1..=100.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl EntryListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_ENTRY_LIMIT)
    }
}

/// Body of `POST /entries/search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchEntries {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    pub job_id: DbId,
    pub query: String,
    /// Defaults to 10; must be within 1..=100.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl SearchEntries {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

/// Entry as returned by `GET /entries`: everything but the transcript.
#[derive(Debug, Clone, Serialize)]
pub struct EntryListItem {
    pub id: DbId,
    pub entry_ts: Timestamp,
    pub summary: Option<String>,
    pub extracted: Json<StateMap>,
}

impl From<Entry> for EntryListItem {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            entry_ts: entry.entry_ts,
            summary: entry.summary,
            extracted: entry.extracted,
        }
    }
}

/// Entry as returned by `POST /entries/search`: no transcript, no extracted data.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySearchHit {
    pub id: DbId,
    pub entry_ts: Timestamp,
    pub summary: Option<String>,
}

impl From<Entry> for EntrySearchHit {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            entry_ts: entry.entry_ts,
            summary: entry.summary,
        }
    }
}
