//! Well-known job status names.
//!
//! The `status` column is free text so clients may introduce their own
//! values; these are the ones the service documents and defaults to.

/// Quote sent, work not yet started.
pub const STATUS_QUOTED: &str = "quoted";

/// Work underway. Every new job starts here.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Work finished.
pub const STATUS_COMPLETE: &str = "complete";

/// Paused, waiting on the client or materials.
pub const STATUS_ON_HOLD: &str = "on_hold";

/// Status assigned to newly created jobs.
pub const DEFAULT_STATUS: &str = STATUS_IN_PROGRESS;

/// All documented status values.
pub const KNOWN_STATUSES: &[&str] = &[
    STATUS_QUOTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETE,
    STATUS_ON_HOLD,
];

/// Whether `status` is one of the documented values.
pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}
