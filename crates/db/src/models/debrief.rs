//! DTOs for the debrief workflow.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entry::Entry;
use super::job::Job;

/// Body of `POST /debrief`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDebrief {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    /// A job id owned by `user_id`, or a job name. Unknown names create a job.
    #[validate(length(min = 1))]
    pub job_name_or_id: String,
    pub transcript: String,
}

/// Response of `POST /debrief`: the job after its state was patched and the
/// entry that was recorded.
#[derive(Debug, Serialize)]
pub struct DebriefResponse {
    pub job: Job,
    pub entry: Entry,
}
