//! DTOs for submissions_sea adapter.

use crate::entities::submissions::SubmissionStatus;

#[derive(Debug, Clone)]
pub struct SubmissionCreate {
    pub cohort_id: i64,
    pub member_id: i64,
    pub squad_id: i64,
    pub title: String,
    pub status: SubmissionStatus,
}
