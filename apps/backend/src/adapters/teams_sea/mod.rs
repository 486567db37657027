//! SeaORM adapter for teams.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::teams;

pub mod dto;

pub use dto::TeamCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    teams::Entity::find()
        .filter(teams::Column::Id.is_in(team_ids.iter().copied()))
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

/// Standings order: points descending, then id.
pub async fn find_all_by_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .order_by_desc(teams::Column::Points)
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    dto: TeamCreate,
) -> Result<teams::Model, sea_orm::DbErr> {
    teams::ActiveModel {
        id: NotSet,
        squad_id: Set(dto.squad_id),
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
    team_id: i64,
    delta: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = teams::Entity::update_many()
        .col_expr(teams::Column::Points, Expr::col(teams::Column::Points).add(delta))
        .filter(teams::Column::Id.eq(team_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    teams::Entity::find().count(conn).await
}
