use db_infra::DbInfraError;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Data integrity violation: {detail}")]
    DataIntegrity { detail: String },
    #[error("Insufficient data: {detail}")]
    InsufficientData { detail: String },
    /// Lower-level persistence failure; `detail` keeps the original message.
    #[error("Transaction failed: {detail}")]
    Transaction { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Transaction { code, .. } => *code,
            AppError::DataIntegrity { .. } => ErrorCode::DataIntegrity,
            AppError::InsufficientData { .. } => ErrorCode::InsufficientData,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::DataIntegrity { detail }
            | AppError::InsufficientData { detail }
            | AppError::Transaction { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail,
        }
    }

    /// HTTP-equivalent status for an outer surface.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Validation { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Conflict { .. } => 409,
            AppError::DataIntegrity { .. }
            | AppError::InsufficientData { .. }
            | AppError::Transaction { .. }
            | AppError::Config { .. }
            | AppError::Internal { .. } => 500,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn data_integrity(detail: impl Into<String>) -> Self {
        Self::DataIntegrity {
            detail: detail.into(),
        }
    }

    pub fn insufficient_data(detail: impl Into<String>) -> Self {
        Self::InsufficientData {
            detail: detail.into(),
        }
    }

    pub fn transaction(detail: impl Into<String>) -> Self {
        Self::Transaction {
            code: ErrorCode::TransactionFailed,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Prefix a transaction/internal failure with the cycle phase it aborted.
    /// Domain outcomes (not found, conflict, ...) are returned unchanged.
    pub fn in_phase(self, phase: &str) -> Self {
        match self {
            AppError::Transaction { code, detail } => AppError::Transaction {
                code,
                detail: format!("{phase}: {detail}"),
            },
            AppError::Internal { detail } => AppError::Internal {
                detail: format!("{phase}: {detail}"),
            },
            other => other,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::invalid(ErrorCode::ValidationError, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::CycleInProgress => ErrorCode::CycleInProgress,
                    ConflictKind::DuplicateVote => ErrorCode::DuplicateVote,
                    ConflictKind::FaceoffResolved => ErrorCode::FaceoffClosed,
                    ConflictKind::FaceoffSlotTaken => ErrorCode::FaceoffSlotTaken,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Cohort => ErrorCode::CohortNotFound,
                    NotFoundKind::Submission => ErrorCode::SubmissionNotFound,
                    NotFoundKind::Faceoff => ErrorCode::FaceoffNotFound,
                    NotFoundKind::Member => ErrorCode::MemberNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::DataIntegrity(detail) => AppError::data_integrity(detail),
            DomainError::InsufficientData(detail) => AppError::insufficient_data(detail),
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                    InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                    InfraErrorKind::Other(_) => ErrorCode::TransactionFailed,
                };
                AppError::Transaction { code, detail }
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<DbInfraError> for AppError {
    fn from(e: DbInfraError) -> Self {
        match e {
            DbInfraError::Config { message } => AppError::config(message),
            DbInfraError::Connect { message } => AppError::Transaction {
                code: ErrorCode::DbUnavailable,
                detail: message,
            },
            DbInfraError::Migration { message } | DbInfraError::Lock { message } => {
                AppError::internal(message)
            }
        }
    }
}
