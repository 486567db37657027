use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::votes::{self, Vote};
use crate::repos::{faceoffs, members};

/// Record one ballot for an open faceoff.
///
/// Rejected when the faceoff is resolved or a bye, when the submission is not
/// one of its sides, when the voter does not exist, and when the voter already
/// voted on this faceoff.
pub async fn cast_vote(
    txn: &DatabaseTransaction,
    faceoff_id: i64,
    voter_member_id: i64,
    submission_id: i64,
) -> Result<Vote, AppError> {
    let faceoff = faceoffs::find_by_id(txn, faceoff_id).await?;

    if faceoff.resolved {
        return Err(AppError::conflict(
            ErrorCode::FaceoffClosed,
            format!("Faceoff {faceoff_id} is already resolved"),
        ));
    }
    if faceoff.is_bye() {
        return Err(AppError::conflict(
            ErrorCode::FaceoffClosed,
            format!("Faceoff {faceoff_id} is a bye and takes no votes"),
        ));
    }
    if !faceoff.has_side(submission_id) {
        return Err(AppError::invalid(
            ErrorCode::InvalidVote,
            format!("Submission {submission_id} is not part of faceoff {faceoff_id}"),
        ));
    }

    if members::find_by_id(txn, voter_member_id).await?.is_none() {
        return Err(AppError::not_found(
            ErrorCode::MemberNotFound,
            format!("Member {voter_member_id} not found"),
        ));
    }

    if votes::find_by_faceoff_and_voter(txn, faceoff_id, voter_member_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            ErrorCode::DuplicateVote,
            format!("Member {voter_member_id} already voted on faceoff {faceoff_id}"),
        ));
    }

    let vote = votes::create_vote(txn, faceoff_id, voter_member_id, submission_id).await?;
    debug!(faceoff_id, voter_member_id, submission_id, "Vote recorded");
    Ok(vote)
}
