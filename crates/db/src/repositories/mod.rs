//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Every lookup is scoped by the owning
//! `user_id` in the same statement as the id predicate.

pub mod entry_repo;
pub mod job_repo;

pub use entry_repo::EntryRepo;
pub use job_repo::JobRepo;
