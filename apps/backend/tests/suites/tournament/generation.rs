use sea_orm::ConnectionTrait;
use serial_test::serial;
use story_arena::config::db::DbKind;
use story_arena::entities::submissions::SubmissionStatus;
use story_arena::repos::faceoffs;
use story_arena::services::tournament::{run_generation, CycleScope};
use story_arena::{generate_faceoffs, generate_faceoffs_for_cohort, AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{
    row_counts, seed_approved, seed_cohort, seed_squad, seed_submission, SquadSeed,
};

#[tokio::test]
#[serial]
async fn big_squad_gets_exactly_four_faceoffs() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let big = seed_squad(&state, cohort, "Owls", 4).await?;
    let small = seed_squad(&state, cohort, "Foxes", 2).await?;
    seed_approved(&state, &big, &[5, 9, 1, 7, 3, 8, 2, 6, 4, 10]).await?;
    seed_approved(&state, &small, &[3, 2, 1]).await?;

    let ids = generate_faceoffs(&state).await?;
    assert_eq!(ids.len(), 6);

    let week = faceoffs::find_all_by_week(state.db(), 1).await?;
    let big_rows: Vec<_> = week.iter().filter(|f| f.squad_id == big.squad_id).collect();
    let small_rows: Vec<_> = week.iter().filter(|f| f.squad_id == small.squad_id).collect();
    assert_eq!(big_rows.len(), 4);
    assert!(big_rows.iter().all(|f| !f.is_bye()));
    assert_eq!(small_rows.len(), 2);
    assert!(small_rows[1].is_bye());
    Ok(())
}

#[tokio::test]
#[serial]
async fn pairs_follow_point_ranking() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let squad = seed_squad(&state, cohort, "Owls", 2).await?;
    // ids in insertion order: 10, 50, 30, 40 points
    let subs = seed_approved(&state, &squad, &[10, 50, 30, 40]).await?;

    generate_faceoffs(&state).await?;

    let rows = faceoffs::find_all_by_week(state.db(), 1).await?;
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].slot, 1);
    assert_eq!(rows[0].submission_a_id, subs[1]);
    assert_eq!(rows[0].submission_b_id, Some(subs[3]));
    assert_eq!(rows[0].seed_a_points, 50);
    assert_eq!(rows[0].seed_b_points, Some(40));

    assert_eq!(rows[1].slot, 2);
    assert_eq!(rows[1].submission_a_id, subs[2]);
    assert_eq!(rows[1].submission_b_id, Some(subs[0]));
    assert!(rows.iter().all(|f| !f.resolved));
    Ok(())
}

#[tokio::test]
#[serial]
async fn empty_squad_is_skipped_and_others_complete() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let full = seed_squad(&state, cohort, "Owls", 2).await?;
    let empty = seed_squad(&state, cohort, "Bats", 1).await?;
    seed_approved(&state, &full, &[4, 3, 2, 1]).await?;

    let outcome = run_generation(&state, CycleScope::All).await?;

    assert_eq!(outcome.week, 1);
    assert_eq!(outcome.faceoff_ids.len(), 2);
    assert_eq!(outcome.skipped_squads, vec![empty.squad_id]);
    Ok(())
}

#[tokio::test]
#[serial]
async fn only_approved_submissions_are_paired() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let squad = seed_squad(&state, cohort, "Owls", 2).await?;
    let approved = seed_approved(&state, &squad, &[2, 1]).await?;
    seed_submission(&state, &squad, SubmissionStatus::Pending).await?;
    seed_submission(&state, &squad, SubmissionStatus::Rejected).await?;

    generate_faceoffs(&state).await?;

    let rows = faceoffs::find_all(state.db()).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].submission_a_id, approved[0]);
    assert_eq!(rows[0].submission_b_id, Some(approved[1]));
    Ok(())
}

#[tokio::test]
#[serial]
async fn weeks_advance_and_paired_submissions_are_not_reused() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let squad = seed_squad(&state, cohort, "Owls", 3).await?;
    let subs = seed_approved(&state, &squad, &[100, 90, 80, 70, 60, 50, 40, 30, 20, 10]).await?;

    let first = run_generation(&state, CycleScope::All).await?;
    assert_eq!(first.week, 1);
    assert_eq!(first.faceoff_ids.len(), 4);

    let second = run_generation(&state, CycleScope::All).await?;
    assert_eq!(second.week, 2);
    assert_eq!(second.faceoff_ids.len(), 1);

    let leftover = faceoffs::find_by_id(state.db(), second.faceoff_ids[0]).await?;
    assert_eq!(leftover.submission_a_id, subs[8]);
    assert_eq!(leftover.submission_b_id, Some(subs[9]));

    let third = run_generation(&state, CycleScope::All).await?;
    assert!(third.faceoff_ids.is_empty());
    assert_eq!(third.skipped_squads, vec![squad.squad_id]);
    assert_eq!(row_counts(&state).await?.faceoffs, 5);
    Ok(())
}

type FaceoffRow = (i64, i32, i16, i64, Option<i64>, i64, Option<i64>);

async fn seeded_snapshot() -> Result<Vec<FaceoffRow>, AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 3).await?;
    let foxes = seed_squad(&state, cohort, "Foxes", 3).await?;
    seed_approved(&state, &owls, &[7, 7, 3, 9, 1]).await?;
    seed_approved(&state, &foxes, &[2, 2, 2, 2]).await?;

    generate_faceoffs(&state).await?;

    Ok(faceoffs::find_all(state.db())
        .await?
        .into_iter()
        .map(|f| {
            (
                f.squad_id,
                f.week,
                f.slot,
                f.submission_a_id,
                f.submission_b_id,
                f.seed_a_points,
                f.seed_b_points,
            )
        })
        .collect())
}

#[tokio::test]
#[serial]
async fn identical_state_yields_identical_faceoffs() -> Result<(), AppError> {
    let first = seeded_snapshot().await?;
    let second = seeded_snapshot().await?;

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
#[serial]
async fn cohort_scope_only_touches_that_cohort() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let spring = seed_cohort(&state, "Spring").await?;
    let autumn = seed_cohort(&state, "Autumn").await?;
    let owls = seed_squad(&state, spring, "Owls", 2).await?;
    let foxes = seed_squad(&state, autumn, "Foxes", 2).await?;
    seed_approved(&state, &owls, &[2, 1]).await?;
    seed_approved(&state, &foxes, &[2, 1]).await?;

    let ids = generate_faceoffs_for_cohort(&state, spring).await?;
    assert_eq!(ids.len(), 1);

    let rows = faceoffs::find_all(state.db()).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].squad_id, owls.squad_id);
    Ok(())
}

#[tokio::test]
#[serial]
async fn unknown_cohort_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = generate_faceoffs_for_cohort(&state, 999).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::CohortNotFound);
    assert_eq!(err.status(), 404);
    assert_eq!(row_counts(&state).await?.faceoffs, 0);
    Ok(())
}

#[tokio::test]
#[serial]
async fn submission_of_missing_squad_aborts_generation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    seed_approved(&state, &owls, &[2, 1]).await?;

    let ghost = SquadSeed {
        squad_id: 999,
        ..owls.clone()
    };
    seed_approved(&state, &ghost, &[5]).await?;

    let err = generate_faceoffs(&state).await.unwrap_err();

    assert!(matches!(err, AppError::DataIntegrity { .. }), "got {err:?}");
    // nothing from the healthy squad was committed either
    assert_eq!(row_counts(&state).await?.faceoffs, 0);
    Ok(())
}

#[tokio::test]
#[serial]
async fn failed_insert_for_a_later_squad_keeps_earlier_rows_out() -> Result<(), AppError> {
    let state = build_test_state().await?;
    if state.db_kind != DbKind::SqliteMemory {
        // the trigger below is SQLite syntax and would outlive a shared database
        return Ok(());
    }
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 2).await?;
    let foxes = seed_squad(&state, cohort, "Foxes", 2).await?;
    seed_approved(&state, &owls, &[4, 3, 2, 1]).await?;
    seed_approved(&state, &foxes, &[2, 1]).await?;

    state
        .db()
        .execute_unprepared(&format!(
            "CREATE TRIGGER block_foxes BEFORE INSERT ON faceoffs \
             WHEN NEW.squad_id = {} BEGIN SELECT RAISE(ABORT, 'faceoff insert blocked'); END",
            foxes.squad_id
        ))
        .await?;

    let result = generate_faceoffs(&state).await;

    assert!(result.is_err(), "got {result:?}");
    assert_eq!(row_counts(&state).await?.faceoffs, 0);

    state
        .db()
        .execute_unprepared("DROP TRIGGER block_foxes")
        .await?;
    let outcome = generate_faceoffs(&state).await?;
    assert_eq!(outcome.len(), 3);
    assert_eq!(faceoffs::find_all_by_week(state.db(), 1).await?.len(), 3);
    Ok(())
}
