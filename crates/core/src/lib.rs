//! Domain building blocks for the job diary service.
//!
//! Nothing in this crate touches the database or the network, so the same
//! rules can be shared by the repository layer, the HTTP handlers and tests.

pub mod debrief;
pub mod error;
pub mod job_state;
pub mod job_status;
pub mod search;
pub mod types;
