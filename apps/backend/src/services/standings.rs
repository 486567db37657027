use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::error::AppError;
use crate::repos::squads::{self, Squad};
use crate::repos::teams::{self, Team};

/// Cumulative totals, highest first; ties ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub squads: Vec<Squad>,
    pub teams: Vec<Team>,
}

pub async fn load_standings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Standings, AppError> {
    Ok(Standings {
        squads: squads::find_all_by_points(conn).await?,
        teams: teams::find_all_by_points(conn).await?,
    })
}
