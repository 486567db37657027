use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::txn_policy;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction opened by the caller and shared with `with_txn`.
/// The owner decides commit/rollback; `with_txn` only runs the closure on it.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Boxed future borrowed from the transaction handed to the closure.
pub type TxnFuture<'t, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 't>>;

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is supplied → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure, apply policy on Ok / rollback on Err
pub async fn with_txn<R, F>(
    shared: Option<&SharedTxn>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxnFuture<'t, R>,
{
    if let Some(shared) = shared {
        return f(shared.transaction()).await;
    }

    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // best-effort rollback; the original error wins
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed closure also failed");
            }
            Err(err)
        }
    }
}
