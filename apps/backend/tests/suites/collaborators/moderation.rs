use sea_orm::TransactionTrait;
use story_arena::entities::submissions::SubmissionStatus;
use story_arena::repos::submissions;
use story_arena::{moderate_post, AppError, ErrorCode, ModerationStatus};

use crate::support::build_test_state;
use crate::support::factory::{seed_cohort, seed_squad, seed_submission};

#[tokio::test]
async fn approval_makes_a_submission_eligible() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let id = seed_submission(&state, &owls, SubmissionStatus::Pending).await?;
    assert!(submissions::find_eligible(state.db(), None).await?.is_empty());

    let txn = state.db().begin().await?;
    let updated = moderate_post(&txn, id, ModerationStatus::Approved).await?;
    txn.commit().await?;

    assert_eq!(updated.status, SubmissionStatus::Approved);
    let eligible = submissions::find_eligible(state.db(), None).await?;
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, id);
    Ok(())
}

#[tokio::test]
async fn rejection_is_stored() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let id = seed_submission(&state, &owls, SubmissionStatus::Approved).await?;

    let txn = state.db().begin().await?;
    moderate_post(&txn, id, "rejected".parse()?).await?;
    txn.commit().await?;

    let stored = submissions::require(state.db(), id).await?;
    assert_eq!(stored.status, SubmissionStatus::Rejected);
    assert!(submissions::find_eligible(state.db(), None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_submission_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let txn = state.db().begin().await?;
    let err = moderate_post(&txn, 77, ModerationStatus::Approved)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert_eq!(err.code(), ErrorCode::SubmissionNotFound);
    Ok(())
}
