//! SeaORM adapter for votes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::votes;

pub mod dto;

pub use dto::VoteCreate;

/// Votes for the given faceoffs, ordered by (faceoff_id, id).
pub async fn find_by_faceoffs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_ids: &[i64],
) -> Result<Vec<votes::Model>, sea_orm::DbErr> {
    if faceoff_ids.is_empty() {
        return Ok(Vec::new());
    }
    votes::Entity::find()
        .filter(votes::Column::FaceoffId.is_in(faceoff_ids.iter().copied()))
        .order_by_asc(votes::Column::FaceoffId)
        .order_by_asc(votes::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_faceoff_and_voter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
    voter_member_id: i64,
) -> Result<Option<votes::Model>, sea_orm::DbErr> {
    votes::Entity::find()
        .filter(votes::Column::FaceoffId.eq(faceoff_id))
        .filter(votes::Column::VoterMemberId.eq(voter_member_id))
        .one(conn)
        .await
}

pub async fn create_vote(
    txn: &DatabaseTransaction,
    dto: VoteCreate,
) -> Result<votes::Model, sea_orm::DbErr> {
    votes::ActiveModel {
        id: NotSet,
        faceoff_id: Set(dto.faceoff_id),
        voter_member_id: Set(dto.voter_member_id),
        submission_id: Set(dto.submission_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    votes::Entity::find().count(conn).await
}
