use std::env;
use std::env::VarError;
use std::str::FromStr;

use story_arena::config::cycle::CycleConfig;
use story_arena::config::db::{DbKind, RuntimeEnv};
use story_arena::infra::state::{build_state, StateBuilder};
use story_arena::state::app_state::AppState;
use story_arena::AppError;

fn read_env_db_kind() -> Result<Option<String>, AppError> {
    match env::var("ARENA_TEST_DB_KIND") {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(AppError::config(format!(
            "failed to read ARENA_TEST_DB_KIND: {err}"
        ))),
    }
}

/// Storage used by integration tests; a private in-memory SQLite unless
/// `ARENA_TEST_DB_KIND` says otherwise.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    let resolved = match read_env_db_kind()? {
        Some(ref raw) => DbKind::from_str(raw.as_str())?,
        None => DbKind::SqliteMemory,
    };
    Ok(resolved)
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state().with_env(RuntimeEnv::Test).with_db(db_kind))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}

pub async fn build_test_state_with(cycle: CycleConfig) -> Result<AppState, AppError> {
    test_state_builder()?.with_cycle_config(cycle).build().await
}
