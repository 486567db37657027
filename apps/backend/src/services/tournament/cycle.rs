//! Externally triggered cycle entry points. Each takes the phase lock, runs
//! its phase in one transaction and either commits everything or nothing.

use std::time::Instant;

use tracing::{error, info};

use super::cycle_lock::{self, CyclePhase};
use super::generation::{CycleScope, GenerationOutcome};
use super::resolution::ResolutionOutcome;
use super::TournamentService;
use crate::config::db::RuntimeEnv;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Generate this week's faceoffs for every squad. Returns the new ids.
pub async fn generate_faceoffs(state: &AppState) -> Result<Vec<i64>, AppError> {
    Ok(run_generation(state, CycleScope::All).await?.faceoff_ids)
}

/// Generate this week's faceoffs for one cohort only.
pub async fn generate_faceoffs_for_cohort(
    state: &AppState,
    cohort_id: i64,
) -> Result<Vec<i64>, AppError> {
    Ok(run_generation(state, CycleScope::Cohort(cohort_id))
        .await?
        .faceoff_ids)
}

/// Tally votes of every open faceoff and roll the results into standings.
pub async fn calculate_results_for_the_week(state: &AppState) -> Result<(), AppError> {
    run_resolution(state).await.map(|_| ())
}

/// Clear all game state except submissions and cohorts. Test runtime only.
pub async fn reset_game_for_testing(state: &AppState) -> Result<(), AppError> {
    if state.env != RuntimeEnv::Test {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "reset is only allowed in the test runtime environment",
        ));
    }

    let _guard = cycle_lock::acquire_process_lock(CyclePhase::Reset)?;
    let service = TournamentService;
    info!("reset=start");

    let result = with_txn(None, state, move |txn| {
        Box::pin(async move {
            cycle_lock::lock_in_txn(txn, CyclePhase::Reset).await?;
            service.reset(txn).await
        })
    })
    .await
    .map_err(|e| e.in_phase(CyclePhase::Reset.as_str()));

    match &result {
        Ok(()) => info!("reset=committed"),
        Err(e) => error!(error = %e, code = %e.code(), "reset=rolled_back"),
    }
    result
}

/// Generation cycle with the full outcome (week, ids, skipped squads).
pub async fn run_generation(
    state: &AppState,
    scope: CycleScope,
) -> Result<GenerationOutcome, AppError> {
    let _guard = cycle_lock::acquire_process_lock(CyclePhase::Generation)?;
    let service = TournamentService;
    let config = state.cycle;
    let started = Instant::now();
    info!(scope = ?scope, matchups_per_squad = config.matchups_per_squad, "generation=start");

    let result = with_txn(None, state, move |txn| {
        Box::pin(async move {
            cycle_lock::lock_in_txn(txn, CyclePhase::Generation).await?;
            service.generate(txn, scope, &config).await
        })
    })
    .await
    .map_err(|e| e.in_phase(CyclePhase::Generation.as_str()));

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => info!(
            week = outcome.week,
            faceoffs = outcome.faceoff_ids.len(),
            skipped_squads = ?outcome.skipped_squads,
            elapsed_ms,
            "generation=committed"
        ),
        Err(e) => error!(error = %e, code = %e.code(), elapsed_ms, "generation=rolled_back"),
    }
    result
}

/// Resolution cycle with the full outcome (results, credits, ignored votes).
pub async fn run_resolution(state: &AppState) -> Result<ResolutionOutcome, AppError> {
    let _guard = cycle_lock::acquire_process_lock(CyclePhase::Resolution)?;
    let service = TournamentService;
    let config = state.cycle;
    let started = Instant::now();
    info!(win_credit = config.win_credit, "resolution=start");

    let result = with_txn(None, state, move |txn| {
        Box::pin(async move {
            cycle_lock::lock_in_txn(txn, CyclePhase::Resolution).await?;
            service.resolve(txn, &config).await
        })
    })
    .await
    .map_err(|e| e.in_phase(CyclePhase::Resolution.as_str()));

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => info!(
            resolved = outcome.results.len(),
            credited = outcome.credits.len(),
            ignored_votes = outcome.ignored_votes,
            elapsed_ms,
            "resolution=committed"
        ),
        Err(e) => error!(error = %e, code = %e.code(), elapsed_ms, "resolution=rolled_back"),
    }
    result
}
