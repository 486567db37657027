//! SeaORM adapter for cohorts.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet, Set};

use crate::entities::cohorts;

pub mod dto;

pub use dto::CohortCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Option<cohorts::Model>, sea_orm::DbErr> {
    cohorts::Entity::find_by_id(cohort_id).one(conn).await
}

pub async fn create_cohort(
    txn: &DatabaseTransaction,
    dto: CohortCreate,
) -> Result<cohorts::Model, sea_orm::DbErr> {
    cohorts::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}
