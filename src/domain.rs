//! Domain module - job listing entities and the rules that join them
//!
//! Each module is its own file in the domain/ directory;
//! public exports are defined here for convenience.

pub mod constants;
pub mod job;
pub mod record_merger;

pub use job::{DedupKey, JobDetail, JobRecord, JobSummary, NormalizedRow};
pub use record_merger::{merge, MergeError};
