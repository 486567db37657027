use std::fmt;
use std::str::FromStr;

use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::entities::submissions::SubmissionStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::submissions::{self, Submission};

/// Outcome a moderator may set. `Pending` is the initial state only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationStatus {
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Approved => "APPROVED",
            ModerationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => Ok(ModerationStatus::Approved),
            "REJECTED" => Ok(ModerationStatus::Rejected),
            other => Err(AppError::invalid(
                ErrorCode::InvalidModerationStatus,
                format!("'{other}' is not a moderation outcome (expected APPROVED or REJECTED)"),
            )),
        }
    }
}

impl From<ModerationStatus> for SubmissionStatus {
    fn from(status: ModerationStatus) -> Self {
        match status {
            ModerationStatus::Approved => SubmissionStatus::Approved,
            ModerationStatus::Rejected => SubmissionStatus::Rejected,
        }
    }
}

/// Set a submission's moderation status.
pub async fn moderate_post(
    txn: &DatabaseTransaction,
    submission_id: i64,
    status: ModerationStatus,
) -> Result<Submission, AppError> {
    let submission = submissions::update_status(txn, submission_id, status.into()).await?;
    info!(submission_id, status = %status, "Submission moderated");
    Ok(submission)
}
