//! SeaORM adapter for faceoffs.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::faceoffs;

pub mod dto;

pub use dto::{FaceoffCreate, FaceoffResolve};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
) -> Result<Option<faceoffs::Model>, sea_orm::DbErr> {
    faceoffs::Entity::find_by_id(faceoff_id).one(conn).await
}

/// Highest week number in the table, None when empty.
pub async fn max_week<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let max: Option<Option<i32>> = faceoffs::Entity::find()
        .select_only()
        .column_as(faceoffs::Column::Week.max(), "max_week")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(max.flatten())
}

/// Unresolved faceoffs in bracket order (squad, week, slot).
pub async fn find_unresolved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<faceoffs::Model>, sea_orm::DbErr> {
    faceoffs::Entity::find()
        .filter(faceoffs::Column::Resolved.eq(false))
        .order_by_asc(faceoffs::Column::SquadId)
        .order_by_asc(faceoffs::Column::Week)
        .order_by_asc(faceoffs::Column::Slot)
        .all(conn)
        .await
}

/// Faceoffs of one week in bracket order.
pub async fn find_all_by_week<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    week: i32,
) -> Result<Vec<faceoffs::Model>, sea_orm::DbErr> {
    faceoffs::Entity::find()
        .filter(faceoffs::Column::Week.eq(week))
        .order_by_asc(faceoffs::Column::SquadId)
        .order_by_asc(faceoffs::Column::Slot)
        .all(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<faceoffs::Model>, sea_orm::DbErr> {
    faceoffs::Entity::find()
        .order_by_asc(faceoffs::Column::Id)
        .all(conn)
        .await
}

/// Insert faceoffs one by one, returning the stored rows in input order.
pub async fn create_faceoffs(
    txn: &DatabaseTransaction,
    dtos: Vec<FaceoffCreate>,
) -> Result<Vec<faceoffs::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let faceoff = faceoffs::ActiveModel {
            id: NotSet,
            squad_id: Set(dto.squad_id),
            week: Set(dto.week),
            slot: Set(dto.slot),
            submission_a_id: Set(dto.submission_a_id),
            submission_b_id: Set(dto.submission_b_id),
            seed_a_points: Set(dto.seed_a_points),
            seed_b_points: Set(dto.seed_b_points),
            resolved: Set(false),
            winner_submission_id: Set(None),
            votes_a: Set(0),
            votes_b: Set(0),
            created_at: Set(now),
            resolved_at: Set(None),
        };
        created.push(faceoff.insert(txn).await?);
    }

    Ok(created)
}

/// Mark a faceoff resolved, but only if it still is unresolved.
/// Returns rows affected: 1 on success, 0 when missing or already resolved.
pub async fn resolve(
    txn: &DatabaseTransaction,
    dto: FaceoffResolve,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = faceoffs::Entity::update_many()
        .col_expr(faceoffs::Column::Resolved, Expr::value(true))
        .col_expr(
            faceoffs::Column::WinnerSubmissionId,
            Expr::value(Some(dto.winner_submission_id)),
        )
        .col_expr(faceoffs::Column::VotesA, Expr::value(dto.votes_a))
        .col_expr(faceoffs::Column::VotesB, Expr::value(dto.votes_b))
        .col_expr(faceoffs::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(faceoffs::Column::Id.eq(dto.faceoff_id))
        .filter(faceoffs::Column::Resolved.eq(false))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    faceoffs::Entity::find().count(conn).await
}
