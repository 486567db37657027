use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::repos::cohorts;
use crate::repos::submissions::{self, Submission};

/// All submissions of a cohort, any status, oldest first.
pub async fn get_submissions_by_cohort<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Vec<Submission>, AppError> {
    cohorts::require(conn, cohort_id).await?;
    Ok(submissions::find_all_by_cohort(conn, cohort_id).await?)
}
