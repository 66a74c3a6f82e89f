//! Rules for the debrief workflow: resolving the target job and deriving the
//! state patch written after each debrief.

use crate::types::{DbId, StateMap, Timestamp};

/// Maximum number of characters of the transcript kept as `last_summary`.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// State key holding the time of the most recent debrief.
pub const KEY_LAST_DEBRIEF_TS: &str = "last_debrief_ts";

/// State key holding the truncated transcript of the most recent debrief.
pub const KEY_LAST_SUMMARY: &str = "last_summary";

/// Interpret `job_name_or_id` as a job id, if it is one.
///
/// Returns `None` for anything that is not a well-formed UUID; the caller
/// then falls back to treating the input as a job name.
pub fn parse_job_id(job_name_or_id: &str) -> Option<DbId> {
    DbId::parse_str(job_name_or_id).ok()
}

/// First [`SUMMARY_MAX_CHARS`] characters of `transcript`, or the whole
/// transcript when it is shorter. Counts characters, not bytes.
pub fn summarize(transcript: &str) -> &str {
    match transcript.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((byte_idx, _)) => &transcript[..byte_idx],
        None => transcript,
    }
}

/// Build the state patch applied to a job after a debrief.
pub fn state_patch(transcript: &str, now: Timestamp) -> StateMap {
    let mut patch = StateMap::new();
    patch.insert(
        KEY_LAST_DEBRIEF_TS.to_string(),
        serde_json::Value::String(now.to_rfc3339()),
    );
    patch.insert(
        KEY_LAST_SUMMARY.to_string(),
        serde_json::Value::String(summarize(transcript).to_string()),
    );
    patch
}
