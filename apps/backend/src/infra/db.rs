use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::db::{DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

/// Single entrypoint for the application pool: connect, then bring the
/// schema up to date.
///
/// In-memory SQLite is migrated on the application pool itself; other kinds
/// migrate through a separate owner pool under the migration lock.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    let pool = db_infra::connect(env, db_kind, DbOwner::App).await?;

    match db_kind {
        DbKind::SqliteMemory => {
            db_infra::orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up)
                .await?;
        }
        DbKind::Postgres | DbKind::SqliteFile => {
            db_infra::orchestrate_migration(env, db_kind, MigrationCommand::Up).await?;
        }
    }

    info!(env = ?env, db_kind = ?db_kind, "db_bootstrap=ready");
    Ok(pool)
}
