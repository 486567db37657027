use serial_test::serial;
use story_arena::services::tournament::cycle_lock::acquire_process_lock;
use story_arena::services::tournament::CyclePhase;
use story_arena::{calculate_results_for_the_week, generate_faceoffs, AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{row_counts, seed_approved, seed_cohort, seed_squad};

#[tokio::test]
#[serial]
async fn running_phase_rejects_a_second_trigger() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    seed_approved(&state, &owls, &[2, 1]).await?;

    let held = acquire_process_lock(CyclePhase::Generation)?;
    let err = generate_faceoffs(&state).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CycleInProgress);
    assert_eq!(err.status(), 409);
    assert_eq!(row_counts(&state).await?.faceoffs, 0);

    drop(held);
    assert_eq!(generate_faceoffs(&state).await?.len(), 1);
    Ok(())
}

#[tokio::test]
#[serial]
async fn phases_lock_independently() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let _held = acquire_process_lock(CyclePhase::Generation)?;
    calculate_results_for_the_week(&state).await?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn concurrent_generations_admit_only_one() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    seed_approved(&state, &owls, &[4, 3, 2, 1]).await?;

    let (first, second) = tokio::join!(generate_faceoffs(&state), generate_faceoffs(&state));

    let conflicts = [&first, &second]
        .iter()
        .filter(|r| matches!(r, Err(e) if e.code() == ErrorCode::CycleInProgress))
        .count();
    assert_eq!(conflicts, 1);
    assert_eq!(row_counts(&state).await?.faceoffs, 2);
    Ok(())
}
