use serial_test::serial;
use story_arena::config::db::RuntimeEnv;
use story_arena::services::tournament::{run_generation, CycleScope};
use story_arena::state::app_state::AppState;
use story_arena::{
    calculate_results_for_the_week, generate_faceoffs, reset_game_for_testing, AppError, ErrorCode,
};

use crate::support::build_test_state;
use crate::support::factory::{row_counts, seed_approved, seed_cohort, seed_squad, seed_votes};

#[tokio::test]
#[serial]
async fn reset_keeps_submissions_and_clears_the_rest() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 3).await?;
    let subs = seed_approved(&state, &owls, &[3, 2, 1, 0]).await?;
    let ids = generate_faceoffs(&state).await?;
    seed_votes(&state, &[(ids[0], owls.member_ids[2], subs[1])]).await?;
    calculate_results_for_the_week(&state).await?;

    let before = row_counts(&state).await?;
    assert_eq!(before.submissions, 4);
    assert!(before.points > 0);

    reset_game_for_testing(&state).await?;

    let after = row_counts(&state).await?;
    assert_eq!(after.submissions, before.submissions);
    assert_eq!(after.squads, 0);
    assert_eq!(after.teams, 0);
    assert_eq!(after.members, 0);
    assert_eq!(after.faceoffs, 0);
    assert_eq!(after.votes, 0);
    assert_eq!(after.points, 0);
    Ok(())
}

#[tokio::test]
#[serial]
async fn reset_restarts_ids_and_weeks() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 2).await?;
    seed_approved(&state, &owls, &[2, 1]).await?;
    generate_faceoffs(&state).await?;
    generate_faceoffs(&state).await?;

    reset_game_for_testing(&state).await?;

    // recreated squad gets the id the stored submissions still point at
    let again = seed_squad(&state, cohort, "Owls", 2).await?;
    assert_eq!(again.squad_id, owls.squad_id);
    assert_eq!(again.member_ids, owls.member_ids);

    let outcome = run_generation(&state, CycleScope::All).await?;
    assert_eq!(outcome.week, 1);
    assert_eq!(outcome.faceoff_ids, vec![1]);
    Ok(())
}

#[tokio::test]
#[serial]
async fn reset_is_refused_outside_the_test_environment() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    seed_squad(&state, cohort, "Owls", 1).await?;
    let prod = AppState::new(state.db.clone(), RuntimeEnv::Prod, state.db_kind, state.cycle);

    let err = reset_game_for_testing(&prod).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(row_counts(&state).await?.squads, 1);
    Ok(())
}
