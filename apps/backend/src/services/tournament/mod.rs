//! Weekly tournament cycle - bridges the pure domain phases with DB persistence.
//!
//! `TournamentService` holds the per-phase steps that run inside a caller's
//! transaction; `cycle` wraps them in locks and transactions for the
//! externally triggered entry points.

pub mod cycle;
pub mod cycle_lock;
mod generation;
mod reset;
mod resolution;

pub use cycle::{
    calculate_results_for_the_week, generate_faceoffs, generate_faceoffs_for_cohort,
    reset_game_for_testing, run_generation, run_resolution,
};
pub use cycle_lock::CyclePhase;
pub use generation::{CycleScope, GenerationOutcome};
pub use resolution::ResolutionOutcome;

/// Tournament service - stateless; every step takes the transaction it runs in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TournamentService;
