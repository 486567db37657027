#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;

// Re-exports for public API
pub use config::cycle::CycleConfig;
pub use config::db::{DbKind, DbOwner, RuntimeEnv};
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::state::build_state;
pub use services::cohorts::get_submissions_by_cohort;
pub use services::moderation::{moderate_post, ModerationStatus};
pub use services::tournament::{
    calculate_results_for_the_week, generate_faceoffs, generate_faceoffs_for_cohort,
    reset_game_for_testing,
};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
