pub mod debrief;
pub mod entries;
pub mod jobs;
