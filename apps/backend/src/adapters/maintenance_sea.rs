//! Bulk maintenance statements (test reset).

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseTransaction, Statement};

/// Tables wiped by the test reset, children before parents.
pub const RESET_TABLES: [&str; 6] = ["votes", "points", "faceoffs", "members", "teams", "squads"];

/// Empty the game tables and restart their id counters.
/// Submissions and cohorts are left alone.
pub async fn truncate_game_tables(txn: &DatabaseTransaction) -> Result<(), sea_orm::DbErr> {
    let backend = txn.get_database_backend();
    match backend {
        DatabaseBackend::Postgres => {
            let sql = format!("TRUNCATE TABLE {} RESTART IDENTITY", RESET_TABLES.join(", "));
            txn.execute(Statement::from_string(backend, sql)).await?;
        }
        _ => {
            for table in RESET_TABLES {
                txn.execute(Statement::from_string(backend, format!("DELETE FROM {table}")))
                    .await?;
            }
            // AUTOINCREMENT counters live in sqlite_sequence once any such table exists
            let has_sequence = txn
                .query_one(Statement::from_string(
                    backend,
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
                ))
                .await?
                .is_some();
            if has_sequence {
                let names = RESET_TABLES
                    .iter()
                    .map(|t| format!("'{t}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                txn.execute(Statement::from_string(
                    backend,
                    format!("DELETE FROM sqlite_sequence WHERE name IN ({names})"),
                ))
                .await?;
            }
        }
    }
    Ok(())
}
