use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::points::{self, PointEntry};
use crate::repos::submissions;

/// Append an award to a submission's ledger. Zero is allowed, negatives are not.
pub async fn award_points(
    txn: &DatabaseTransaction,
    submission_id: i64,
    amount: i64,
) -> Result<PointEntry, AppError> {
    if amount < 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidAmount,
            format!("Award amount must not be negative, got {amount}"),
        ));
    }
    submissions::require(txn, submission_id).await?;

    let entry = points::create_award(txn, submission_id, amount).await?;
    debug!(submission_id, amount, "Points awarded");
    Ok(entry)
}
