//! Submissions repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::submissions_sea as submissions_adapter;
use crate::entities::submissions::{self, SubmissionStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Submission domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub cohort_id: i64,
    pub member_id: i64,
    pub squad_id: i64,
    pub title: String,
    pub status: SubmissionStatus,
    pub created_at: time::OffsetDateTime,
}

/// Data for creating a submission
#[derive(Debug, Clone)]
pub struct SubmissionData {
    pub cohort_id: i64,
    pub member_id: i64,
    pub squad_id: i64,
    pub title: String,
    pub status: SubmissionStatus,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission_id: i64,
) -> Result<Option<Submission>, DomainError> {
    let submission = submissions_adapter::find_by_id(conn, submission_id).await?;
    Ok(submission.map(Submission::from))
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission_id: i64,
) -> Result<Submission, DomainError> {
    find_by_id(conn, submission_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Submission,
            format!("Submission {submission_id} not found"),
        )
    })
}

pub async fn find_all_by_cohort<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Vec<Submission>, DomainError> {
    let rows = submissions_adapter::find_all_by_cohort(conn, cohort_id).await?;
    Ok(rows.into_iter().map(Submission::from).collect())
}

/// Approved, not yet paired submissions (optionally of one cohort).
pub async fn find_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: Option<i64>,
) -> Result<Vec<Submission>, DomainError> {
    let rows = submissions_adapter::find_eligible(conn, cohort_id).await?;
    Ok(rows.into_iter().map(Submission::from).collect())
}

pub async fn create_submission(
    txn: &DatabaseTransaction,
    data: SubmissionData,
) -> Result<Submission, DomainError> {
    let dto = submissions_adapter::SubmissionCreate {
        cohort_id: data.cohort_id,
        member_id: data.member_id,
        squad_id: data.squad_id,
        title: data.title,
        status: data.status,
    };
    let submission = submissions_adapter::create_submission(txn, dto).await?;
    Ok(Submission::from(submission))
}

pub async fn update_status(
    txn: &DatabaseTransaction,
    submission_id: i64,
    status: SubmissionStatus,
) -> Result<Submission, DomainError> {
    submissions_adapter::update_status(txn, submission_id, status)
        .await?
        .map(Submission::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Submission,
                format!("Submission {submission_id} not found"),
            )
        })
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(submissions_adapter::count_all(conn).await?)
}

impl From<submissions::Model> for Submission {
    fn from(model: submissions::Model) -> Self {
        Self {
            id: model.id,
            cohort_id: model.cohort_id,
            member_id: model.member_id,
            squad_id: model.squad_id,
            title: model.title,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
