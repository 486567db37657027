use sea_orm::DatabaseConnection;

use crate::config::cycle::CycleConfig;
use crate::config::db::{DbKind, RuntimeEnv};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application pool (migrated)
    pub db: DatabaseConnection,
    pub env: RuntimeEnv,
    pub db_kind: DbKind,
    pub cycle: CycleConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        env: RuntimeEnv,
        db_kind: DbKind,
        cycle: CycleConfig,
    ) -> Self {
        Self {
            db,
            env,
            db_kind,
            cycle,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
