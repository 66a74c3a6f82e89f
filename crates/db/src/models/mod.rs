//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for the requests that touch it
//! - Reduced response projections where a full row is not returned

pub mod debrief;
pub mod entry;
pub mod job;
