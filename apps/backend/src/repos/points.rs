//! Points ledger repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::points_sea as points_adapter;
use crate::domain::standings::WinCredit;
use crate::entities::points::{self, PointReason};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct PointEntry {
    pub id: i64,
    pub submission_id: Option<i64>,
    pub team_id: Option<i64>,
    pub squad_id: Option<i64>,
    pub faceoff_id: Option<i64>,
    pub week: Option<i32>,
    pub amount: i64,
    pub reason: PointReason,
    pub created_at: time::OffsetDateTime,
}

/// `(submission_id, amount)` for every award row of the given submissions.
pub async fn award_amounts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission_ids: &[i64],
) -> Result<Vec<(i64, i64)>, DomainError> {
    let rows = points_adapter::find_awards_for_submissions(conn, submission_ids).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.submission_id.map(|id| (id, row.amount)))
        .collect())
}

pub async fn find_by_faceoff<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
) -> Result<Vec<PointEntry>, DomainError> {
    let rows = points_adapter::find_by_faceoff(conn, faceoff_id).await?;
    Ok(rows.into_iter().map(PointEntry::from).collect())
}

pub async fn create_award(
    txn: &DatabaseTransaction,
    submission_id: i64,
    amount: i64,
) -> Result<PointEntry, DomainError> {
    let dto = points_adapter::PointCreate {
        submission_id: Some(submission_id),
        team_id: None,
        squad_id: None,
        faceoff_id: None,
        week: None,
        amount,
        reason: PointReason::Award,
    };
    Ok(PointEntry::from(points_adapter::create_point(txn, dto).await?))
}

pub async fn create_win_credit(
    txn: &DatabaseTransaction,
    credit: &WinCredit,
) -> Result<PointEntry, DomainError> {
    let dto = points_adapter::PointCreate {
        submission_id: None,
        team_id: Some(credit.team_id),
        squad_id: Some(credit.squad_id),
        faceoff_id: Some(credit.faceoff_id),
        week: Some(credit.week),
        amount: credit.amount,
        reason: PointReason::FaceoffWin,
    };
    Ok(PointEntry::from(points_adapter::create_point(txn, dto).await?))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(points_adapter::count_all(conn).await?)
}

impl From<points::Model> for PointEntry {
    fn from(model: points::Model) -> Self {
        Self {
            id: model.id,
            submission_id: model.submission_id,
            team_id: model.team_id,
            squad_id: model.squad_id,
            faceoff_id: model.faceoff_id,
            week: model.week,
            amount: model.amount,
            reason: model.reason,
            created_at: model.created_at,
        }
    }
}
