// Default policy for this binary is CommitOnOk (see tests/common).

use story_arena::db::txn::with_txn;
use story_arena::db::txn_policy::{current, TxnPolicy};
use story_arena::repos::cohorts;
use story_arena::{AppError, ErrorCode};
use tracing::debug;

use crate::support::build_test_state;

#[tokio::test]
async fn ok_closure_commits() -> Result<(), AppError> {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = build_test_state().await?;

    let cohort_id = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let cohort = cohorts::create_cohort(txn, "Committed").await?;
            debug!(cohort_id = cohort.id, "inserted cohort inside txn");
            Ok::<_, AppError>(cohort.id)
        })
    })
    .await?;

    let stored = cohorts::find_by_id(state.db(), cohort_id).await?;
    assert_eq!(stored.map(|c| c.name), Some("Committed".to_string()));
    Ok(())
}

#[tokio::test]
async fn err_closure_rolls_back_and_keeps_the_error() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let result = with_txn(None, &state, |txn| {
        Box::pin(async move {
            cohorts::create_cohort(txn, "Doomed").await?;
            Err::<i64, _>(AppError::conflict(ErrorCode::Conflict, "forced failure"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.detail(), "forced failure");
    assert!(cohorts::find_by_id(state.db(), 1).await?.is_none());
    Ok(())
}
