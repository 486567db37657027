//! Single-writer guard per cycle phase.

use std::fmt;

use db_infra::locking::{try_advisory_xact_lock, Guard, InProcessLock};
use sea_orm::DatabaseTransaction;

use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Generation,
    Resolution,
    Reset,
}

impl CyclePhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Generation => "generation",
            CyclePhase::Resolution => "resolution",
            CyclePhase::Reset => "reset",
        }
    }

    pub fn lock_key(&self) -> String {
        format!("arena:cycle:{}", self.as_str())
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn in_progress(phase: CyclePhase) -> AppError {
    AppError::conflict(
        ErrorCode::CycleInProgress,
        format!("A {phase} cycle is already running"),
    )
}

/// Take the in-process lock for `phase`; released when the guard drops.
pub fn acquire_process_lock(phase: CyclePhase) -> Result<Guard, AppError> {
    InProcessLock::new(phase.lock_key())
        .try_acquire_now()
        .ok_or_else(|| in_progress(phase))
}

/// Take the transaction-scoped advisory lock (PostgreSQL only) so separate
/// processes serialize as well.
pub async fn lock_in_txn(txn: &DatabaseTransaction, phase: CyclePhase) -> Result<(), AppError> {
    if try_advisory_xact_lock(txn, &phase.lock_key()).await? {
        Ok(())
    } else {
        Err(in_progress(phase))
    }
}
