#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Cycle tests chain committed phases, so the default here is commit.
// Flip per run with `ARENA_TXN_POLICY=rollback`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("ARENA_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => story_arena::db::txn_policy::TxnPolicy::RollbackOnOk,
        _ => story_arena::db::txn_policy::TxnPolicy::CommitOnOk,
    };

    story_arena::db::txn_policy::set_txn_policy(policy);
}
