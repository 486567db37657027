//! Votes repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::votes_sea as votes_adapter;
use crate::entities::votes;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: i64,
    pub faceoff_id: i64,
    pub voter_member_id: i64,
    pub submission_id: i64,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_faceoffs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_ids: &[i64],
) -> Result<Vec<Vote>, DomainError> {
    let rows = votes_adapter::find_by_faceoffs(conn, faceoff_ids).await?;
    Ok(rows.into_iter().map(Vote::from).collect())
}

pub async fn find_by_faceoff_and_voter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    faceoff_id: i64,
    voter_member_id: i64,
) -> Result<Option<Vote>, DomainError> {
    let vote = votes_adapter::find_by_faceoff_and_voter(conn, faceoff_id, voter_member_id).await?;
    Ok(vote.map(Vote::from))
}

/// Insert a ballot. A second ballot by the same voter surfaces as
/// `Conflict(DuplicateVote)` through the unique index.
pub async fn create_vote(
    txn: &DatabaseTransaction,
    faceoff_id: i64,
    voter_member_id: i64,
    submission_id: i64,
) -> Result<Vote, DomainError> {
    let dto = votes_adapter::VoteCreate {
        faceoff_id,
        voter_member_id,
        submission_id,
    };
    Ok(Vote::from(votes_adapter::create_vote(txn, dto).await?))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(votes_adapter::count_all(conn).await?)
}

impl From<votes::Model> for Vote {
    fn from(model: votes::Model) -> Self {
        Self {
            id: model.id,
            faceoff_id: model.faceoff_id,
            voter_member_id: model.voter_member_id,
            submission_id: model.submission_id,
            created_at: model.created_at,
        }
    }
}
