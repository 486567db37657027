// Standard library imports
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

// External crate imports
use async_trait::async_trait;
use fs4::fs_std::FileExt;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

// Internal crate imports
use crate::error::DbInfraError;

/// Stable 64-bit advisory lock id for a textual key.
pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Keys currently held by in-process locks.
static IN_PROCESS_HELD: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

enum Held {
    Postgres {
        admin_pool: DatabaseConnection,
        lock_key: i64,
    },
    SqliteFile {
        file: File,
        lock_path: PathBuf,
    },
    InProcess {
        key: String,
    },
}

/// A held lock. Call [`Guard::release`] when done; dropping also releases
/// in-process and file locks.
pub struct Guard {
    held: Option<Held>,
}

impl Guard {
    fn new(held: Held) -> Self {
        Self { held: Some(held) }
    }

    /// Key of an in-process guard (None for the other flavours).
    pub fn key(&self) -> Option<&str> {
        match &self.held {
            Some(Held::InProcess { key }) => Some(key.as_str()),
            _ => None,
        }
    }

    pub async fn release(mut self) -> Result<(), DbInfraError> {
        let Some(held) = self.held.take() else {
            return Ok(());
        };

        match held {
            Held::InProcess { key } => {
                IN_PROCESS_HELD.lock().remove(&key);
                debug!(key = %key, "In-process lock released");
                Ok(())
            }
            Held::SqliteFile { file, lock_path } => {
                if let Err(e) = file.unlock() {
                    // the OS lock goes away with the handle anyway
                    debug!(
                        error = %e,
                        lock_path = %lock_path.display(),
                        "SQLite file unlock returned error (may be benign)"
                    );
                } else {
                    debug!(lock_path = %lock_path.display(), "SQLite file lock released");
                }
                Ok(())
            }
            Held::Postgres {
                admin_pool,
                lock_key,
            } => {
                let stmt = Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    "SELECT pg_advisory_unlock($1) AS unlocked",
                    vec![lock_key.into()],
                );

                match admin_pool.query_one(stmt).await {
                    Ok(Some(row)) => {
                        let unlocked: bool = row
                            .try_get("", "unlocked")
                            .map_err(|e| {
                                DbInfraError::lock(format!("failed to read unlock result: {e}"))
                            })?;
                        if !unlocked {
                            warn!(
                                code = "PG_UNLOCK_FALSE",
                                lock_key,
                                "Advisory lock unlock returned false"
                            );
                        }
                    }
                    Ok(None) => warn!(lock_key, "No result from advisory lock unlock query"),
                    Err(e) => warn!(error = %e, lock_key, "Failed to unlock advisory lock"),
                }
                Ok(())
            }
        }
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        match self.held.take() {
            Some(Held::InProcess { key }) => {
                IN_PROCESS_HELD.lock().remove(&key);
            }
            Some(Held::Postgres { lock_key, .. }) => {
                warn!(
                    lock_key,
                    "Advisory lock guard dropped without release; lock is freed when the admin session closes"
                );
            }
            // file handle drop releases the OS lock
            Some(Held::SqliteFile { .. }) | None => {}
        }
    }
}

/// Non-blocking exclusive lock.
#[async_trait]
pub trait ExclusiveLock: Send {
    /// Returns Some(Guard) if acquired, None if already held elsewhere.
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError>;
}

/// Session-level PostgreSQL advisory lock.
///
/// INVARIANT: the admin pool is configured with min=max=1 so the unlock runs
/// on the same physical session that took the lock.
pub struct PgAdvisoryLock {
    admin_pool: DatabaseConnection,
    lock_key: i64,
}

impl PgAdvisoryLock {
    pub fn new(admin_pool: DatabaseConnection, key: &str) -> Self {
        Self {
            admin_pool,
            lock_key: pg_lock_id(key),
        }
    }
}

#[async_trait]
impl ExclusiveLock for PgAdvisoryLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_try_advisory_lock($1) AS locked",
            vec![self.lock_key.into()],
        );

        let row = self
            .admin_pool
            .query_one(stmt)
            .await
            .map_err(|e| DbInfraError::lock(format!("failed to acquire advisory lock: {e}")))?
            .ok_or_else(|| DbInfraError::lock("pg_try_advisory_lock returned no row"))?;

        let locked: bool = row
            .try_get("", "locked")
            .map_err(|e| DbInfraError::lock(format!("failed to read lock result: {e}")))?;

        if !locked {
            return Ok(None);
        }

        Ok(Some(Guard::new(Held::Postgres {
            admin_pool: self.admin_pool.clone(),
            lock_key: self.lock_key,
        })))
    }
}

/// OS-level exclusive lock on a `<db>.migrate.lock` file, for SQLite files.
pub struct SqliteFileLock {
    lock_path: PathBuf,
}

impl SqliteFileLock {
    pub fn new(lock_path: &Path) -> Self {
        Self {
            lock_path: lock_path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ExclusiveLock for SqliteFileLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        if let Some(parent) = self.lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbInfraError::lock(format!("failed to create lock file parent directory: {e}"))
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| DbInfraError::lock(format!("failed to open lock file: {e}")))?;

        match file.try_lock_exclusive() {
            Ok(true) => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock acquired");
                Ok(Some(Guard::new(Held::SqliteFile {
                    file,
                    lock_path: self.lock_path.clone(),
                })))
            }
            Ok(false) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(DbInfraError::lock(format!(
                "failed to acquire SQLite file lock: {e}"
            ))),
        }
    }
}

/// Process-local lock keyed by name. Two guards for the same key never coexist
/// within one process.
pub struct InProcessLock {
    key: String,
}

impl InProcessLock {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Synchronous variant of [`ExclusiveLock::try_acquire`].
    pub fn try_acquire_now(&self) -> Option<Guard> {
        let mut held = IN_PROCESS_HELD.lock();
        if !held.insert(self.key.clone()) {
            return None;
        }
        Some(Guard::new(Held::InProcess {
            key: self.key.clone(),
        }))
    }
}

#[async_trait]
impl ExclusiveLock for InProcessLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        Ok(self.try_acquire_now())
    }
}

/// Take a transaction-scoped advisory lock on PostgreSQL. The lock is released
/// at commit or rollback. Other backends have no equivalent and report `true`.
pub async fn try_advisory_xact_lock<C>(conn: &C, key: &str) -> Result<bool, DbInfraError>
where
    C: ConnectionTrait,
{
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(true);
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_try_advisory_xact_lock($1) AS locked",
        vec![pg_lock_id(key).into()],
    );

    let row = conn
        .query_one(stmt)
        .await
        .map_err(|e| DbInfraError::lock(format!("failed to acquire xact advisory lock: {e}")))?
        .ok_or_else(|| DbInfraError::lock("pg_try_advisory_xact_lock returned no row"))?;

    row.try_get("", "locked")
        .map_err(|e| DbInfraError::lock(format!("failed to read lock result: {e}")))
}
