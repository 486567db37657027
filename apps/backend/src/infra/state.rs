use crate::config::cycle::CycleConfig;
use crate::config::db::{db_kind_from_env, runtime_env_from_env, DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    cycle: CycleConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            cycle: CycleConfig::default(),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, db_kind: DbKind) -> Self {
        self.db_kind = Some(db_kind);
        self
    }

    pub fn with_cycle_config(mut self, cycle: CycleConfig) -> Self {
        self.cycle = cycle;
        self
    }

    /// Fill env, db kind and cycle tunables from `ARENA_*` variables.
    pub fn from_process_env(self) -> Result<Self, AppError> {
        Ok(self
            .with_env(runtime_env_from_env()?)
            .with_db(db_kind_from_env()?)
            .with_cycle_config(CycleConfig::from_env()?))
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db_kind = self
            .db_kind
            .ok_or_else(|| AppError::config("no database configured for state"))?;
        // single entrypoint: build + migrate
        let conn = bootstrap_db(self.env, db_kind).await?;
        Ok(AppState::new(conn, self.env, db_kind, self.cycle))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
