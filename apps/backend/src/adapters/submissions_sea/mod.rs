//! SeaORM adapter for submissions.

use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::submissions::SubmissionStatus;
use crate::entities::{faceoffs, submissions};

pub mod dto;

pub use dto::SubmissionCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission_id: i64,
) -> Result<Option<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find_by_id(submission_id).one(conn).await
}

/// All submissions of a cohort, oldest first.
pub async fn find_all_by_cohort<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: i64,
) -> Result<Vec<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::CohortId.eq(cohort_id))
        .order_by_asc(submissions::Column::Id)
        .all(conn)
        .await
}

/// Approved submissions that no faceoff references yet, optionally limited
/// to one cohort. Ordered by id.
pub async fn find_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: Option<i64>,
) -> Result<Vec<submissions::Model>, sea_orm::DbErr> {
    let used_as_a = Query::select()
        .column(faceoffs::Column::SubmissionAId)
        .from(faceoffs::Entity)
        .to_owned();
    // NOT IN with a NULL in the list matches nothing, so byes are filtered out
    let used_as_b = Query::select()
        .column(faceoffs::Column::SubmissionBId)
        .from(faceoffs::Entity)
        .and_where(faceoffs::Column::SubmissionBId.is_not_null())
        .to_owned();

    let mut query = submissions::Entity::find()
        .filter(submissions::Column::Status.eq(SubmissionStatus::Approved))
        .filter(submissions::Column::Id.not_in_subquery(used_as_a))
        .filter(submissions::Column::Id.not_in_subquery(used_as_b));

    if let Some(cohort_id) = cohort_id {
        query = query.filter(submissions::Column::CohortId.eq(cohort_id));
    }

    query
        .order_by_asc(submissions::Column::Id)
        .all(conn)
        .await
}

pub async fn create_submission(
    txn: &DatabaseTransaction,
    dto: SubmissionCreate,
) -> Result<submissions::Model, sea_orm::DbErr> {
    submissions::ActiveModel {
        id: sea_orm::NotSet,
        cohort_id: Set(dto.cohort_id),
        member_id: Set(dto.member_id),
        squad_id: Set(dto.squad_id),
        title: Set(dto.title),
        status: Set(dto.status),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

/// Set the moderation status. Returns `None` when the submission does not exist.
pub async fn update_status(
    txn: &DatabaseTransaction,
    submission_id: i64,
    status: SubmissionStatus,
) -> Result<Option<submissions::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(txn, submission_id).await? else {
        return Ok(None);
    };
    let mut active: submissions::ActiveModel = existing.into();
    active.status = Set(status);
    active.update(txn).await.map(Some)
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    submissions::Entity::find().count(conn).await
}
