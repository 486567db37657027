use sea_orm::TransactionTrait;
use story_arena::repos::{squads, teams};
use story_arena::services::standings::load_standings;
use story_arena::AppError;

use crate::support::build_test_state;
use crate::support::factory::{seed_cohort, seed_squad};

#[tokio::test]
async fn ordered_by_points_then_id() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let cohort = seed_cohort(&state, "Spring").await?;
    let owls = seed_squad(&state, cohort, "Owls", 1).await?;
    let foxes = seed_squad(&state, cohort, "Foxes", 1).await?;
    let bats = seed_squad(&state, cohort, "Bats", 1).await?;

    let txn = state.db().begin().await?;
    squads::add_points(&txn, foxes.squad_id, 20).await?;
    squads::add_points(&txn, bats.squad_id, 20).await?;
    teams::add_points(&txn, owls.team_id, 5).await?;
    txn.commit().await?;

    let standings = load_standings(state.db()).await?;

    let squad_order: Vec<i64> = standings.squads.iter().map(|s| s.id).collect();
    assert_eq!(squad_order, vec![foxes.squad_id, bats.squad_id, owls.squad_id]);
    let team_order: Vec<i64> = standings.teams.iter().map(|t| t.id).collect();
    assert_eq!(team_order, vec![owls.team_id, foxes.team_id, bats.team_id]);
    assert_eq!(standings.teams[0].points, 5);
    Ok(())
}
