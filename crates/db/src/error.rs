use jobdiary_core::types::DbId;

/// Failures from repository operations that carry a domain meaning beyond a
/// plain database error.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The parent job does not exist or belongs to a different user.
    #[error("Job {job_id} not found for this owner")]
    JobNotFound { job_id: DbId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
