use sea_orm::DatabaseTransaction;

use super::TournamentService;
use crate::adapters::maintenance_sea;
use crate::error::AppError;

impl TournamentService {
    /// Wipe votes, points, faceoffs, members, teams and squads and restart
    /// their ids. Submissions and cohorts survive.
    pub async fn reset(&self, txn: &DatabaseTransaction) -> Result<(), AppError> {
        maintenance_sea::truncate_game_tables(txn).await?;
        Ok(())
    }
}
