//! SeaORM adapter for squads.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::squads;

pub mod dto;

pub use dto::SquadCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    squad_id: i64,
) -> Result<Option<squads::Model>, sea_orm::DbErr> {
    squads::Entity::find_by_id(squad_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    squad_ids: &[i64],
) -> Result<Vec<squads::Model>, sea_orm::DbErr> {
    if squad_ids.is_empty() {
        return Ok(Vec::new());
    }
    squads::Entity::find()
        .filter(squads::Column::Id.is_in(squad_ids.iter().copied()))
        .order_by_asc(squads::Column::Id)
        .all(conn)
        .await
}

/// Squads ordered by id, optionally limited to one cohort.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: Option<i64>,
) -> Result<Vec<squads::Model>, sea_orm::DbErr> {
    let mut query = squads::Entity::find();
    if let Some(cohort_id) = cohort_id {
        query = query.filter(squads::Column::CohortId.eq(cohort_id));
    }
    query.order_by_asc(squads::Column::Id).all(conn).await
}

/// Standings order: points descending, then id.
pub async fn find_all_by_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<squads::Model>, sea_orm::DbErr> {
    squads::Entity::find()
        .order_by_desc(squads::Column::Points)
        .order_by_asc(squads::Column::Id)
        .all(conn)
        .await
}

pub async fn create_squad(
    txn: &DatabaseTransaction,
    dto: SquadCreate,
) -> Result<squads::Model, sea_orm::DbErr> {
    squads::ActiveModel {
        id: NotSet,
        cohort_id: Set(dto.cohort_id),
        name: Set(dto.name),
        points: Set(0),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

/// `points = points + delta` in SQL. Returns rows affected (0 when missing).
pub async fn add_points(
    txn: &DatabaseTransaction,
    squad_id: i64,
    delta: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = squads::Entity::update_many()
        .col_expr(
            squads::Column::Points,
            Expr::col(squads::Column::Points).add(delta),
        )
        .filter(squads::Column::Id.eq(squad_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    squads::Entity::find().count(conn).await
}
