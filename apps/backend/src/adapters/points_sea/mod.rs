//! SeaORM adapter for the points ledger.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::points::{self, PointReason};

pub mod dto;

pub use dto::PointCreate;

/// Award rows for the given submissions, ordered by (submission_id, id).
pub async fn find_awards_for_submissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission_ids: &[i64],
) -> Result<Vec<points::Model>, sea_orm::DbErr> {
    if submission_ids.is_empty() {
        return Ok(Vec::new());
    }
    points::Entity::find()
        .filter(points::Column::Reason.eq(PointReason::Award))
        .filter(points::Column::SubmissionId.is_in(submission_ids.iter().copied()))
        .order_by_asc(points::Column::SubmissionId)
        .order_by_asc(points::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_faceoff<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
) -> Result<Vec<points::Model>, sea_orm::DbErr> {
    points::Entity::find()
        .filter(points::Column::FaceoffId.eq(faceoff_id))
        .order_by_asc(points::Column::Id)
        .all(conn)
        .await
}

pub async fn create_point(
    txn: &DatabaseTransaction,
    dto: PointCreate,
) -> Result<points::Model, sea_orm::DbErr> {
    points::ActiveModel {
        id: NotSet,
        submission_id: Set(dto.submission_id),
        team_id: Set(dto.team_id),
        squad_id: Set(dto.squad_id),
        faceoff_id: Set(dto.faceoff_id),
        week: Set(dto.week),
        amount: Set(dto.amount),
        reason: Set(dto.reason),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    points::Entity::find().count(conn).await
}
