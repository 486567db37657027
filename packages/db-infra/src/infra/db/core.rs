use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use rand::Rng;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tracing::{info, trace, warn};

use crate::config::db::{
    make_conn_spec, sqlite_lock_path, validate_db_config, DbKind, DbOwner, RuntimeEnv,
};
use crate::error::DbInfraError;
use crate::infra::db::locking::{
    ExclusiveLock, Guard, InProcessLock, PgAdvisoryLock, SqliteFileLock,
};

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(url: &str, db_kind: DbKind, single: bool) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_owned());
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // every in-memory connection is a separate database
    if single || db_kind == DbKind::SqliteMemory {
        opt.min_connections(1).max_connections(1);
    } else {
        opt.max_connections(8);
    }
    opt
}

async fn open_pool(
    opt: ConnectOptions,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    if db_kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| DbInfraError::Connect {
                        message: format!("failed to connect to Postgres: {e}"),
                    })
                }
            },
            5,
            500,
        )
        .await
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to SQLite: {e}"),
            })
    }
}

/// Connect an application pool. Does NOT run migrations.
pub async fn connect(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    validate_db_config(env, db_kind)?;
    let url = make_conn_spec(env, db_kind, owner)?;
    let pool = open_pool(connect_options(&url, db_kind, false), db_kind).await?;

    if db_kind != DbKind::Postgres {
        apply_sqlite_pragmas(&pool, db_kind).await?;
    }
    Ok(pool)
}

/// Single-session owner pool used for migrations and session-level locks.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
    open_pool(connect_options(&url, db_kind, true), db_kind).await
}

async fn apply_sqlite_pragmas(
    pool: &DatabaseConnection,
    db_kind: DbKind,
) -> Result<(), DbInfraError> {
    let mut pragmas = vec!["PRAGMA foreign_keys = ON;"];
    if db_kind == DbKind::SqliteFile {
        pragmas.push("PRAGMA journal_mode = WAL;");
        pragmas.push("PRAGMA synchronous = NORMAL;");
    }
    for pragma in pragmas {
        pool.execute(Statement::from_string(sea_orm::DatabaseBackend::Sqlite, pragma))
            .await
            .map_err(|e| DbInfraError::config(format!("failed to apply '{pragma}': {e}")))?;
    }
    Ok(())
}

/// Mask the password in a connection string (for lock keys and logs).
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.split_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if auth_part[..colon_pos].contains("://") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

async fn schema_up_to_date(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected = Migrator::migrations();
    let expected_last = expected.last().map(|m| m.name().to_string());

    let applied = match Migrator::get_applied_migrations(conn).await {
        Ok(applied) => applied,
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::Migration {
                message: format!("failed to get applied migrations: {e}"),
            })
        }
    };

    let current_last = applied.last().map(|m| m.name().to_string());
    let up_to_date = applied.len() == expected.len() && current_last == expected_last;
    trace!(
        fastpath = if up_to_date { "hit" } else { "miss" },
        applied = applied.len(),
        expected = expected.len()
    );
    Ok(up_to_date)
}

/// Connect with owner credentials and run a migration command under a lock.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;
    let admin_pool = build_admin_pool(env, db_kind).await?;
    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

/// Run a migration command on an existing pool. In-memory SQLite must use
/// this with the application pool itself, since no other connection can see
/// the same database.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(env = ?env, db_kind = ?db_kind, command = ?command, "migrate=start");

    if command == MigrationCommand::Status {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::Migration {
                message: format!("migration execution failed: {e}"),
            })?;
        info!("migrate=done");
        return Ok(());
    }

    let result = match db_kind {
        DbKind::Postgres => {
            let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
            let key = format!("arena:migrate:{}", sanitize_db_url(&url));
            migrate_with_lock(pool, PgAdvisoryLock::new(pool.clone(), &key), env, command).await
        }
        DbKind::SqliteFile => {
            let lock = SqliteFileLock::new(&sqlite_lock_path(env));
            migrate_with_lock(pool, lock, env, command).await
        }
        DbKind::SqliteMemory => {
            // in-memory databases are private to this process
            let lock = InProcessLock::new(format!("arena:migrate:memory:{:p}", pool));
            migrate_with_lock(pool, lock, env, command).await
        }
    };

    info!(ok = result.is_ok(), "migrate=done");
    result
}

async fn migrate_with_lock<L>(
    pool: &DatabaseConnection,
    mut lock: L,
    env: RuntimeEnv,
    command: MigrationCommand,
) -> Result<(), DbInfraError>
where
    L: ExclusiveLock,
{
    let acquire_ms = std::env::var("ARENA_MIGRATE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(match env {
            RuntimeEnv::Test => 3000,
            RuntimeEnv::Prod => 900,
        });

    let start = Instant::now();
    let mut attempts: u32 = 0;

    let guard: Guard = loop {
        attempts += 1;

        if command == MigrationCommand::Up && schema_up_to_date(pool).await? {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }

        if let Some(guard) = lock.try_acquire().await? {
            trace!(lock = "won", attempts, elapsed_ms = start.elapsed().as_millis() as u64);
            break guard;
        }

        if start.elapsed() >= Duration::from_millis(acquire_ms) {
            return Err(DbInfraError::lock(format!(
                "migration lock acquisition timeout after {:?} ({attempts} attempts)",
                start.elapsed()
            )));
        }

        let base_delay_ms = (5u64 << attempts.saturating_sub(1).min(4)).min(80);
        let jitter_ms = rand::rng().random_range(0..4u64);
        trace!(lock = "backoff", attempts, delay_ms = base_delay_ms + jitter_ms);
        tokio::time::sleep(Duration::from_millis(base_delay_ms + jitter_ms)).await;
    };

    let outcome = migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        });

    let outcome = match outcome {
        Ok(()) => verify_counts(pool, command).await,
        Err(e) => Err(e),
    };

    if let Err(release_err) = guard.release().await {
        warn!(error = %release_err, "Failed to release migration guard");
    }
    outcome
}

async fn verify_counts(
    pool: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let expected = Migrator::migrations().len();
    let applied = migration::count_applied_migrations(pool)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("failed to count applied migrations: {e}"),
        })?;

    let ok = match command {
        MigrationCommand::Reset => applied == 0,
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh => {
            applied == expected
        }
        MigrationCommand::Down | MigrationCommand::Status => true,
    };

    if !ok {
        return Err(DbInfraError::Migration {
            message: format!(
                "migration verification failed after {command:?}: expected {expected}, applied {applied}"
            ),
        });
    }
    Ok(())
}
