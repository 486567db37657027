//! Seed data for cycle tests.
//!
//! Every helper opens and commits its own transaction, so fixtures persist
//! regardless of the process transaction policy.

use sea_orm::TransactionTrait;
use story_arena::entities::submissions::SubmissionStatus;
use story_arena::repos::submissions::SubmissionData;
use story_arena::repos::{cohorts, faceoffs, members, points, squads, submissions, teams, votes};
use story_arena::services::votes::cast_vote;
use story_arena::state::app_state::AppState;
use story_arena::AppError;

/// A squad with one team and its members.
#[derive(Debug, Clone)]
pub struct SquadSeed {
    pub cohort_id: i64,
    pub squad_id: i64,
    pub team_id: i64,
    pub member_ids: Vec<i64>,
}

pub async fn seed_cohort(state: &AppState, name: &str) -> Result<i64, AppError> {
    let txn = state.db().begin().await?;
    let cohort = cohorts::create_cohort(&txn, name).await?;
    txn.commit().await?;
    Ok(cohort.id)
}

pub async fn seed_squad(
    state: &AppState,
    cohort_id: i64,
    name: &str,
    member_count: usize,
) -> Result<SquadSeed, AppError> {
    let txn = state.db().begin().await?;
    let squad = squads::create_squad(&txn, cohort_id, name).await?;
    let team = teams::create_team(&txn, squad.id, &format!("{name} team")).await?;
    let mut member_ids = Vec::with_capacity(member_count);
    for i in 0..member_count {
        let member =
            members::create_member(&txn, team.id, squad.id, &format!("{name} kid {i}")).await?;
        member_ids.push(member.id);
    }
    txn.commit().await?;

    Ok(SquadSeed {
        cohort_id,
        squad_id: squad.id,
        team_id: team.id,
        member_ids,
    })
}

/// One approved submission per entry of `awards`, each with a single award
/// row of that amount. Authors rotate through the squad's members.
pub async fn seed_approved(
    state: &AppState,
    squad: &SquadSeed,
    awards: &[i64],
) -> Result<Vec<i64>, AppError> {
    let txn = state.db().begin().await?;
    let mut ids = Vec::with_capacity(awards.len());
    for (i, &amount) in awards.iter().enumerate() {
        let submission = submissions::create_submission(
            &txn,
            SubmissionData {
                cohort_id: squad.cohort_id,
                member_id: squad.member_ids[i % squad.member_ids.len()],
                squad_id: squad.squad_id,
                title: format!("Story {i}"),
                status: SubmissionStatus::Approved,
            },
        )
        .await?;
        points::create_award(&txn, submission.id, amount).await?;
        ids.push(submission.id);
    }
    txn.commit().await?;
    Ok(ids)
}

pub async fn seed_submission(
    state: &AppState,
    squad: &SquadSeed,
    status: SubmissionStatus,
) -> Result<i64, AppError> {
    let txn = state.db().begin().await?;
    let submission = submissions::create_submission(
        &txn,
        SubmissionData {
            cohort_id: squad.cohort_id,
            member_id: squad.member_ids[0],
            squad_id: squad.squad_id,
            title: "Pending story".to_string(),
            status,
        },
    )
    .await?;
    txn.commit().await?;
    Ok(submission.id)
}

/// Cast a batch of `(faceoff_id, voter_member_id, submission_id)` ballots.
pub async fn seed_votes(state: &AppState, ballots: &[(i64, i64, i64)]) -> Result<(), AppError> {
    let txn = state.db().begin().await?;
    for &(faceoff_id, voter, submission_id) in ballots {
        cast_vote(&txn, faceoff_id, voter, submission_id).await?;
    }
    txn.commit().await?;
    Ok(())
}

/// Row counts of every game table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub submissions: u64,
    pub squads: u64,
    pub teams: u64,
    pub members: u64,
    pub faceoffs: u64,
    pub votes: u64,
    pub points: u64,
}

pub async fn row_counts(state: &AppState) -> Result<RowCounts, AppError> {
    let db = state.db();
    Ok(RowCounts {
        submissions: submissions::count_all(db).await?,
        squads: squads::count_all(db).await?,
        teams: teams::count_all(db).await?,
        members: members::count_all(db).await?,
        faceoffs: faceoffs::count_all(db).await?,
        votes: votes::count_all(db).await?,
        points: points::count_all(db).await?,
    })
}
