//! Shared database configuration, pool building, migration orchestration and locks.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use error::DbInfraError;
pub use infra::db::core::{connect, orchestrate_migration, orchestrate_migration_internal};
pub use infra::db::locking;
