//! Squads repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::squads_sea as squads_adapter;
use crate::entities::squads;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Squad {
    pub id: i64,
    pub cohort_id: i64,
    pub name: String,
    pub points: i64,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    squad_id: i64,
) -> Result<Option<Squad>, DomainError> {
    let squad = squads_adapter::find_by_id(conn, squad_id).await?;
    Ok(squad.map(Squad::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    squad_ids: &[i64],
) -> Result<Vec<Squad>, DomainError> {
    let rows = squads_adapter::find_by_ids(conn, squad_ids).await?;
    Ok(rows.into_iter().map(Squad::from).collect())
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cohort_id: Option<i64>,
) -> Result<Vec<Squad>, DomainError> {
    let rows = squads_adapter::find_all(conn, cohort_id).await?;
    Ok(rows.into_iter().map(Squad::from).collect())
}

pub async fn find_all_by_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Squad>, DomainError> {
    let rows = squads_adapter::find_all_by_points(conn).await?;
    Ok(rows.into_iter().map(Squad::from).collect())
}

pub async fn create_squad(
    txn: &DatabaseTransaction,
    cohort_id: i64,
    name: &str,
) -> Result<Squad, DomainError> {
    let dto = squads_adapter::SquadCreate {
        cohort_id,
        name: name.to_string(),
    };
    Ok(Squad::from(squads_adapter::create_squad(txn, dto).await?))
}

/// Add `delta` to the squad's cumulative points. A missing squad is a data
/// integrity failure.
pub async fn add_points(
    txn: &DatabaseTransaction,
    squad_id: i64,
    delta: i64,
) -> Result<(), DomainError> {
    match squads_adapter::add_points(txn, squad_id, delta).await? {
        1 => Ok(()),
        _ => Err(DomainError::data_integrity(format!(
            "Squad {squad_id} does not exist"
        ))),
    }
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(squads_adapter::count_all(conn).await?)
}

impl From<squads::Model> for Squad {
    fn from(model: squads::Model) -> Self {
        Self {
            id: model.id,
            cohort_id: model.cohort_id,
            name: model.name,
            points: model.points,
            created_at: model.created_at,
        }
    }
}
