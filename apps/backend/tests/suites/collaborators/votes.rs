use sea_orm::{DatabaseTransaction, TransactionTrait};
use serial_test::serial;
use story_arena::repos::votes as votes_repo;
use story_arena::services::votes::cast_vote;
use story_arena::state::app_state::AppState;
use story_arena::{calculate_results_for_the_week, generate_faceoffs, AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{seed_approved, seed_cohort, seed_squad, SquadSeed};

struct Arena {
    state: AppState,
    voters: SquadSeed,
    subs: Vec<i64>,
    faceoffs: Vec<i64>,
}

/// Three approved stories: one real faceoff and one bye.
async fn arena() -> Result<Arena, AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let voters = seed_squad(&state, cohort, "Voters", 2).await?;
    let subs = seed_approved(&state, &owls, &[3, 2, 1]).await?;
    let faceoffs = generate_faceoffs(&state).await?;
    Ok(Arena {
        state,
        voters,
        subs,
        faceoffs,
    })
}

async fn rejected(
    txn: DatabaseTransaction,
    result: Result<votes_repo::Vote, AppError>,
) -> AppError {
    let _ = txn.rollback().await;
    match result {
        Ok(vote) => panic!("vote unexpectedly accepted: {vote:?}"),
        Err(e) => e,
    }
}

#[tokio::test]
#[serial]
async fn ballot_is_recorded() -> Result<(), AppError> {
    let a = arena().await?;

    let txn = a.state.db().begin().await?;
    let vote = cast_vote(&txn, a.faceoffs[0], a.voters.member_ids[0], a.subs[1]).await?;
    txn.commit().await?;

    assert_eq!(vote.submission_id, a.subs[1]);
    let stored =
        votes_repo::find_by_faceoff_and_voter(a.state.db(), a.faceoffs[0], a.voters.member_ids[0])
            .await?
            .unwrap();
    assert_eq!(stored.id, vote.id);
    Ok(())
}

#[tokio::test]
#[serial]
async fn second_ballot_by_same_voter_is_a_conflict() -> Result<(), AppError> {
    let a = arena().await?;
    let voter = a.voters.member_ids[0];

    let txn = a.state.db().begin().await?;
    cast_vote(&txn, a.faceoffs[0], voter, a.subs[0]).await?;
    let second = cast_vote(&txn, a.faceoffs[0], voter, a.subs[1]).await;
    let err = rejected(txn, second).await;

    assert_eq!(err.code(), ErrorCode::DuplicateVote);
    assert_eq!(err.status(), 409);
    Ok(())
}

#[tokio::test]
#[serial]
async fn submission_outside_the_faceoff_is_invalid() -> Result<(), AppError> {
    let a = arena().await?;

    let txn = a.state.db().begin().await?;
    let result = cast_vote(&txn, a.faceoffs[0], a.voters.member_ids[0], a.subs[2]).await;
    let err = rejected(txn, result).await;

    assert_eq!(err.code(), ErrorCode::InvalidVote);
    Ok(())
}

#[tokio::test]
#[serial]
async fn bye_takes_no_votes() -> Result<(), AppError> {
    let a = arena().await?;

    let txn = a.state.db().begin().await?;
    let result = cast_vote(&txn, a.faceoffs[1], a.voters.member_ids[0], a.subs[2]).await;
    let err = rejected(txn, result).await;

    assert_eq!(err.code(), ErrorCode::FaceoffClosed);
    Ok(())
}

#[tokio::test]
#[serial]
async fn resolved_faceoff_takes_no_votes() -> Result<(), AppError> {
    let a = arena().await?;
    calculate_results_for_the_week(&a.state).await?;

    let txn = a.state.db().begin().await?;
    let result = cast_vote(&txn, a.faceoffs[0], a.voters.member_ids[0], a.subs[0]).await;
    let err = rejected(txn, result).await;

    assert_eq!(err.code(), ErrorCode::FaceoffClosed);
    Ok(())
}

#[tokio::test]
#[serial]
async fn unknown_voter_and_faceoff_are_not_found() -> Result<(), AppError> {
    let a = arena().await?;

    let txn = a.state.db().begin().await?;
    let result = cast_vote(&txn, a.faceoffs[0], 9_999, a.subs[0]).await;
    let err = rejected(txn, result).await;
    assert_eq!(err.code(), ErrorCode::MemberNotFound);

    let txn = a.state.db().begin().await?;
    let result = cast_vote(&txn, 9_999, a.voters.member_ids[0], a.subs[0]).await;
    let err = rejected(txn, result).await;
    assert_eq!(err.code(), ErrorCode::FaceoffNotFound);
    Ok(())
}
