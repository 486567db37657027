use story_arena::entities::submissions::SubmissionStatus;
use story_arena::{get_submissions_by_cohort, AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{seed_approved, seed_cohort, seed_squad, seed_submission};

#[tokio::test]
async fn lists_every_submission_of_the_cohort() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let spring = seed_cohort(&state, "Spring").await?;
    let autumn = seed_cohort(&state, "Autumn").await?;
    let owls = seed_squad(&state, spring, "Owls", 1).await?;
    let foxes = seed_squad(&state, autumn, "Foxes", 1).await?;
    let approved = seed_approved(&state, &owls, &[1]).await?;
    let pending = seed_submission(&state, &owls, SubmissionStatus::Pending).await?;
    seed_approved(&state, &foxes, &[1]).await?;

    let subs = get_submissions_by_cohort(state.db(), spring).await?;

    let ids: Vec<i64> = subs.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![approved[0], pending]);
    assert!(subs.iter().all(|s| s.cohort_id == spring));
    Ok(())
}

#[tokio::test]
async fn empty_cohort_returns_no_submissions() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let spring = seed_cohort(&state, "Spring").await?;

    assert!(get_submissions_by_cohort(state.db(), spring).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_cohort_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = get_submissions_by_cohort(state.db(), 42).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::CohortNotFound);
    assert_eq!(err.status(), 404);
    Ok(())
}
