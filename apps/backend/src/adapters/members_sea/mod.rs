//! SeaORM adapter for members.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, Set,
};

use crate::entities::members;

pub mod dto;

pub use dto::MemberCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    member_id: i64,
) -> Result<Option<members::Model>, sea_orm::DbErr> {
    members::Entity::find_by_id(member_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    member_ids: &[i64],
) -> Result<Vec<members::Model>, sea_orm::DbErr> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }
    members::Entity::find()
        .filter(members::Column::Id.is_in(member_ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn create_member(
    txn: &DatabaseTransaction,
    dto: MemberCreate,
) -> Result<members::Model, sea_orm::DbErr> {
    members::ActiveModel {
        id: NotSet,
        team_id: Set(dto.team_id),
        squad_id: Set(dto.squad_id),
        display_name: Set(dto.display_name),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    members::Entity::find().count(conn).await
}
