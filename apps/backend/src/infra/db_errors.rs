//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here (via `?` and the
//! `From` impl below) and services map `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the column list from SQLite "UNIQUE constraint failed: t.a, t.b" messages.
fn extract_sqlite_columns(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    let rest = &error_msg[start..];
    Some(rest.split(['\n', '"']).next().unwrap_or(rest).trim())
}

/// Map a unique violation to a domain conflict. SQLite names the columns,
/// PostgreSQL names the index.
fn map_unique_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite_cols = extract_sqlite_columns(error_msg).unwrap_or_default();

    if error_msg.contains("ux_votes_faceoff_voter")
        || sqlite_cols.starts_with("votes.faceoff_id, votes.voter_member_id")
    {
        return Some((
            ConflictKind::DuplicateVote,
            "Voter already cast a ballot in this faceoff",
        ));
    }
    if error_msg.contains("ux_faceoffs_squad_week_slot")
        || sqlite_cols.starts_with("faceoffs.squad_id, faceoffs.week, faceoffs.slot")
    {
        return Some((
            ConflictKind::FaceoffSlotTaken,
            "Faceoff slot already exists for this squad and week",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError`. Unclassified failures keep the
/// original driver message in the detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(
                InfraErrorKind::DbUnavailable,
                format!("Database unavailable: {error_msg}"),
            );
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::data_integrity(format!(
            "Foreign key constraint violation: {error_msg}"
        ));
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(
            InfraErrorKind::Timeout,
            format!("Database timeout: {error_msg}"),
        );
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), error_msg)
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
