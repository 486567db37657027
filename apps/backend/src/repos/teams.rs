//! Teams repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::teams_sea as teams_adapter;
use crate::entities::teams;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: i64,
    pub squad_id: i64,
    pub name: String,
    pub points: i64,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    let team = teams_adapter::find_by_id(conn, team_id).await?;
    Ok(team.map(Team::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_adapter::find_by_ids(conn, team_ids).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn find_all_by_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_adapter::find_all_by_points(conn).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    squad_id: i64,
    name: &str,
) -> Result<Team, DomainError> {
    let dto = teams_adapter::TeamCreate {
        squad_id,
        name: name.to_string(),
    };
    Ok(Team::from(teams_adapter::create_team(txn, dto).await?))
}

/// Add `delta` to the team's cumulative points. A missing team is a data
/// integrity failure.
pub async fn add_points(
    txn: &DatabaseTransaction,
    team_id: i64,
    delta: i64,
) -> Result<(), DomainError> {
    match teams_adapter::add_points(txn, team_id, delta).await? {
        1 => Ok(()),
        _ => Err(DomainError::data_integrity(format!(
            "Team {team_id} does not exist"
        ))),
    }
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(teams_adapter::count_all(conn).await?)
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Self {
            id: model.id,
            squad_id: model.squad_id,
            name: model.name,
            points: model.points,
            created_at: model.created_at,
        }
    }
}
