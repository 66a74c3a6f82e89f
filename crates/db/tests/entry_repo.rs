//! Integration tests for `EntryRepo` against a real database.
//!
//! Covers parent-job ownership checks, defaults, ordering and the
//! case-insensitive substring search.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use jobdiary_core::types::{DbId, StateMap};
use jobdiary_db::error::RepoError;
use jobdiary_db::models::entry::CreateEntry;
use jobdiary_db::models::job::{CreateJob, Job};
use jobdiary_db::repositories::{EntryRepo, JobRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_job(pool: &PgPool, user_id: &str, name: &str) -> Job {
    let input = CreateJob {
        user_id: user_id.to_string(),
        name: name.to_string(),
        address: None,
        client_name: None,
    };
    JobRepo::create(pool, &input).await.unwrap()
}

fn new_entry(user_id: &str, job_id: DbId, transcript: &str) -> CreateEntry {
    CreateEntry {
        user_id: user_id.to_string(),
        job_id,
        transcript: transcript.to_string(),
        extracted: None,
        summary: None,
        entry_ts: None,
    }
}

async fn count_entries(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM entries")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry_defaults(pool: PgPool) {
    let job = create_job(&pool, "alice", "Hot water").await;
    let before = Utc::now() - Duration::seconds(5);

    let entry = EntryRepo::create(&pool, &new_entry("alice", job.id, "Replaced anode"))
        .await
        .unwrap();

    assert_eq!(entry.job_id, job.id);
    assert_eq!(entry.user_id, "alice");
    assert_eq!(entry.transcript, "Replaced anode");
    assert!(entry.extracted.is_empty());
    assert!(entry.summary.is_none());
    assert!(entry.entry_ts >= before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry_keeps_supplied_fields(pool: PgPool) {
    let job = create_job(&pool, "alice", "Hot water").await;
    let backdated = Utc::now() - Duration::days(3);
    let mut extracted = StateMap::new();
    extracted.insert("parts".into(), json!(["anode", "valve"]));

    let input = CreateEntry {
        extracted: Some(extracted.clone()),
        summary: Some("Anode swap".into()),
        entry_ts: Some(backdated),
        ..new_entry("alice", job.id, "Long transcript text")
    };
    let entry = EntryRepo::create(&pool, &input).await.unwrap();

    assert_eq!(entry.extracted.0, extracted);
    assert_eq!(entry.summary.as_deref(), Some("Anode swap"));
    // Postgres stores microseconds.
    assert_eq!(
        entry.entry_ts.timestamp_micros(),
        backdated.timestamp_micros()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry_for_missing_job_fails_without_writing(pool: PgPool) {
    let missing = DbId::new_v4();
    let result = EntryRepo::create(&pool, &new_entry("alice", missing, "Ghost")).await;

    assert_matches!(result, Err(RepoError::JobNotFound { job_id }) if job_id == missing);
    assert_eq!(count_entries(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry_for_foreign_job_fails(pool: PgPool) {
    let job = create_job(&pool, "alice", "Private").await;

    let result = EntryRepo::create(&pool, &new_entry("bob", job.id, "Sneaky")).await;

    assert_matches!(result, Err(RepoError::JobNotFound { .. }));
    assert_eq!(count_entries(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_entries_newest_first(pool: PgPool) {
    let job = create_job(&pool, "alice", "Tiling").await;
    let now = Utc::now();

    for (days_ago, text) in [(2, "oldest"), (0, "newest"), (1, "middle")] {
        let input = CreateEntry {
            entry_ts: Some(now - Duration::days(days_ago)),
            ..new_entry("alice", job.id, text)
        };
        EntryRepo::create(&pool, &input).await.unwrap();
    }

    let entries = EntryRepo::list_by_job(&pool, "alice", job.id, 20)
        .await
        .unwrap();
    let transcripts: Vec<&str> = entries.iter().map(|e| e.transcript.as_str()).collect();
    assert_eq!(transcripts, vec!["newest", "middle", "oldest"]);

    let limited = EntryRepo::list_by_job(&pool, "alice", job.id, 2)
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_entries_for_foreign_or_missing_job_is_empty(pool: PgPool) {
    let job = create_job(&pool, "alice", "Tiling").await;
    EntryRepo::create(&pool, &new_entry("alice", job.id, "Grout done"))
        .await
        .unwrap();

    assert!(EntryRepo::list_by_job(&pool, "bob", job.id, 20)
        .await
        .unwrap()
        .is_empty());
    assert!(EntryRepo::list_by_job(&pool, "alice", DbId::new_v4(), 20)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_transcript_case_insensitively(pool: PgPool) {
    let job = create_job(&pool, "alice", "Plumbing").await;
    let hit = EntryRepo::create(&pool, &new_entry("alice", job.id, "Found a LEAK under sink"))
        .await
        .unwrap();
    EntryRepo::create(&pool, &new_entry("alice", job.id, "Fitted new mixer tap"))
        .await
        .unwrap();

    let results = EntryRepo::search(&pool, "alice", job.id, "leak", 10)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_summary(pool: PgPool) {
    let job = create_job(&pool, "alice", "Plumbing").await;
    let input = CreateEntry {
        summary: Some("Slow leak at the valve".into()),
        ..new_entry("alice", job.id, "Checked the meter overnight")
    };
    let hit = EntryRepo::create(&pool, &input).await.unwrap();

    let results = EntryRepo::search(&pool, "alice", job.id, "Leak", 10)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let job = create_job(&pool, "alice", "Quote").await;
    let hit = EntryRepo::create(&pool, &new_entry("alice", job.id, "Gave 10% discount"))
        .await
        .unwrap();
    EntryRepo::create(&pool, &new_entry("alice", job.id, "Gave 100 bucks discount"))
        .await
        .unwrap();

    let results = EntryRepo::search(&pool, "alice", job.id, "10%", 10)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit.id);

    let none = EntryRepo::search(&pool, "alice", job.id, "_", 10).await.unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_empty_or_unmatched_query_is_empty(pool: PgPool) {
    let job = create_job(&pool, "alice", "Plumbing").await;
    EntryRepo::create(&pool, &new_entry("alice", job.id, "Found a leak"))
        .await
        .unwrap();

    assert!(EntryRepo::search(&pool, "alice", job.id, "", 10)
        .await
        .unwrap()
        .is_empty());
    assert!(EntryRepo::search(&pool, "alice", job.id, "termite", 10)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_owner_scoped(pool: PgPool) {
    let job = create_job(&pool, "alice", "Plumbing").await;
    EntryRepo::create(&pool, &new_entry("alice", job.id, "Found a leak"))
        .await
        .unwrap();

    let results = EntryRepo::search(&pool, "bob", job.id, "leak", 10)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_orders_newest_first_and_limits(pool: PgPool) {
    let job = create_job(&pool, "alice", "Plumbing").await;
    let now = Utc::now();
    let mut ids = Vec::new();
    for days_ago in [3, 1, 2] {
        let input = CreateEntry {
            entry_ts: Some(now - Duration::days(days_ago)),
            ..new_entry("alice", job.id, &format!("leak check day -{days_ago}"))
        };
        ids.push((days_ago, EntryRepo::create(&pool, &input).await.unwrap().id));
    }

    let results = EntryRepo::search(&pool, "alice", job.id, "leak", 2)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, ids[1].1); // 1 day ago
    assert_eq!(results[1].id, ids[2].1); // 2 days ago
}
