use std::env;

pub use db_infra::db::{DbKind, DbOwner, RuntimeEnv};

use crate::error::AppError;

/// Storage flavour from `ARENA_DB_KIND` (defaults to `postgres`).
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    match env::var("ARENA_DB_KIND") {
        Ok(raw) if !raw.trim().is_empty() => raw.parse::<DbKind>().map_err(AppError::from),
        _ => Ok(DbKind::Postgres),
    }
}

/// Runtime environment from `ARENA_ENV` (`prod` | `test`, defaults to `prod`).
pub fn runtime_env_from_env() -> Result<RuntimeEnv, AppError> {
    let raw = env::var("ARENA_ENV").unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "prod" | "production" => Ok(RuntimeEnv::Prod),
        "test" => Ok(RuntimeEnv::Test),
        other => Err(AppError::config(format!(
            "ARENA_ENV must be 'prod' or 'test', got '{other}'"
        ))),
    }
}
