pub mod core;
pub mod locking;

pub use core::{build_admin_pool, connect, orchestrate_migration, orchestrate_migration_internal};
pub use locking::{
    pg_lock_id, try_advisory_xact_lock, ExclusiveLock, Guard, InProcessLock, PgAdvisoryLock,
    SqliteFileLock,
};
