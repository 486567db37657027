use sea_orm::TransactionTrait;
use story_arena::entities::points::PointReason;
use story_arena::repos::points;
use story_arena::services::points::award_points;
use story_arena::{AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{seed_approved, seed_cohort, seed_squad};

#[tokio::test]
async fn awards_accumulate_in_the_ledger() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let subs = seed_approved(&state, &owls, &[5]).await?;

    let txn = state.db().begin().await?;
    let entry = award_points(&txn, subs[0], 7).await?;
    award_points(&txn, subs[0], 0).await?;
    txn.commit().await?;

    assert_eq!(entry.reason, PointReason::Award);
    assert_eq!(entry.submission_id, Some(subs[0]));
    let amounts = points::award_amounts(state.db(), &subs).await?;
    let total: i64 = amounts.iter().map(|(_, amount)| amount).sum();
    assert_eq!(amounts.len(), 3);
    assert_eq!(total, 12);
    Ok(())
}

#[tokio::test]
async fn negative_amount_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let subs = seed_approved(&state, &owls, &[5]).await?;

    let txn = state.db().begin().await?;
    let err = award_points(&txn, subs[0], -1).await.unwrap_err();
    txn.rollback().await?;

    assert_eq!(err.code(), ErrorCode::InvalidAmount);
    assert_eq!(err.status(), 400);
    Ok(())
}

#[tokio::test]
async fn award_for_unknown_submission_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let txn = state.db().begin().await?;
    let err = award_points(&txn, 123, 4).await.unwrap_err();
    txn.rollback().await?;

    assert_eq!(err.code(), ErrorCode::SubmissionNotFound);
    Ok(())
}
