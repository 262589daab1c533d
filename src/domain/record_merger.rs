//! Summary + detail join

use thiserror::Error;

use super::job::{JobDetail, JobRecord, JobSummary};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("detail link {detail} does not match summary link {summary}")]
    LinkMismatch { summary: String, detail: String },
}

/// Join a summary with the detail scraped from its link.
///
/// The detail's link wins in the merged record, the summary provides the keyword.
pub fn merge(summary: &JobSummary, detail: JobDetail) -> Result<JobRecord, MergeError> {
    if summary.link != detail.link {
        return Err(MergeError::LinkMismatch {
            summary: summary.link.to_string(),
            detail: detail.link.to_string(),
        });
    }

    Ok(JobRecord {
        title: summary.title.clone(),
        company: summary.company.clone(),
        location: summary.location.clone(),
        salary: detail.salary,
        required_experience: detail.required_experience,
        skills: JobRecord::join_skills(&detail.skills),
        time_posted: detail.time_posted,
        link: detail.link.to_string(),
        keyword: summary.keyword.clone(),
    })
}
