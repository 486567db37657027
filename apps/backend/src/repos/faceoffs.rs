//! Faceoffs repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::faceoffs_sea as faceoffs_adapter;
use crate::domain::matchups::MatchupPlan;
use crate::domain::tally::TallyResult;
use crate::entities::faceoffs;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Faceoff domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Faceoff {
    pub id: i64,
    pub squad_id: i64,
    pub week: i32,
    pub slot: i16,
    pub submission_a_id: i64,
    pub submission_b_id: Option<i64>,
    pub seed_a_points: i64,
    pub seed_b_points: Option<i64>,
    pub resolved: bool,
    pub winner_submission_id: Option<i64>,
    pub votes_a: i32,
    pub votes_b: i32,
    pub created_at: time::OffsetDateTime,
    pub resolved_at: Option<time::OffsetDateTime>,
}

impl Faceoff {
    pub fn is_bye(&self) -> bool {
        self.submission_b_id.is_none()
    }

    pub fn has_side(&self, submission_id: i64) -> bool {
        self.submission_a_id == submission_id || self.submission_b_id == Some(submission_id)
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
) -> Result<Faceoff, DomainError> {
    faceoffs_adapter::find_by_id(conn, faceoff_id)
        .await?
        .map(Faceoff::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Faceoff, format!("Faceoff {faceoff_id} not found"))
        })
}

/// Week for the next generation cycle: one past the latest, 1 on an empty table.
pub async fn next_week<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<i32, DomainError> {
    let latest = faceoffs_adapter::max_week(conn).await?;
    Ok(latest.map_or(1, |w| w + 1))
}

pub async fn find_unresolved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Faceoff>, DomainError> {
    let rows = faceoffs_adapter::find_unresolved(conn).await?;
    Ok(rows.into_iter().map(Faceoff::from).collect())
}

pub async fn find_all_by_week<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    week: i32,
) -> Result<Vec<Faceoff>, DomainError> {
    let rows = faceoffs_adapter::find_all_by_week(conn, week).await?;
    Ok(rows.into_iter().map(Faceoff::from).collect())
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Faceoff>, DomainError> {
    let rows = faceoffs_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(Faceoff::from).collect())
}

/// Persist the planned faceoffs for `week`. Returns the new ids in plan order.
pub async fn create_faceoffs(
    txn: &DatabaseTransaction,
    week: i32,
    plans: &[MatchupPlan],
) -> Result<Vec<i64>, DomainError> {
    let dtos = plans
        .iter()
        .map(|plan| faceoffs_adapter::FaceoffCreate {
            squad_id: plan.squad_id,
            week,
            slot: plan.slot,
            submission_a_id: plan.side_a.submission_id,
            submission_b_id: plan.side_b.as_ref().map(|b| b.submission_id),
            seed_a_points: plan.side_a.points,
            seed_b_points: plan.side_b.as_ref().map(|b| b.points),
        })
        .collect();

    let created = faceoffs_adapter::create_faceoffs(txn, dtos).await?;
    Ok(created.into_iter().map(|f| f.id).collect())
}

/// Write a tally result. Fails with a conflict when the faceoff is missing
/// or was resolved in the meantime.
pub async fn resolve(txn: &DatabaseTransaction, result: &TallyResult) -> Result<(), DomainError> {
    let dto = faceoffs_adapter::FaceoffResolve {
        faceoff_id: result.faceoff_id,
        winner_submission_id: result.winner_submission_id,
        votes_a: result.votes_a as i32,
        votes_b: result.votes_b as i32,
    };
    match faceoffs_adapter::resolve(txn, dto).await? {
        1 => Ok(()),
        _ => Err(DomainError::conflict(
            ConflictKind::FaceoffResolved,
            format!("Faceoff {} is no longer open", result.faceoff_id),
        )),
    }
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(faceoffs_adapter::count_all(conn).await?)
}

impl From<faceoffs::Model> for Faceoff {
    fn from(model: faceoffs::Model) -> Self {
        Self {
            id: model.id,
            squad_id: model.squad_id,
            week: model.week,
            slot: model.slot,
            submission_a_id: model.submission_a_id,
            submission_b_id: model.submission_b_id,
            seed_a_points: model.seed_a_points,
            seed_b_points: model.seed_b_points,
            resolved: model.resolved,
            winner_submission_id: model.winner_submission_id,
            votes_a: model.votes_a,
            votes_b: model.votes_b,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}
