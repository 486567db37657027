//! Members repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::members_sea as members_adapter;
use crate::entities::members;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub squad_id: i64,
    pub display_name: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    member_id: i64,
) -> Result<Option<Member>, DomainError> {
    let member = members_adapter::find_by_id(conn, member_id).await?;
    Ok(member.map(Member::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    member_ids: &[i64],
) -> Result<Vec<Member>, DomainError> {
    let rows = members_adapter::find_by_ids(conn, member_ids).await?;
    Ok(rows.into_iter().map(Member::from).collect())
}

pub async fn create_member(
    txn: &DatabaseTransaction,
    team_id: i64,
    squad_id: i64,
    display_name: &str,
) -> Result<Member, DomainError> {
    let dto = members_adapter::MemberCreate {
        team_id,
        squad_id,
        display_name: display_name.to_string(),
    };
    Ok(Member::from(members_adapter::create_member(txn, dto).await?))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(members_adapter::count_all(conn).await?)
}

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            squad_id: model.squad_id,
            display_name: model.display_name,
            created_at: model.created_at,
        }
    }
}
