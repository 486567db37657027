//! Error codes for the Story Arena engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are what the CLI prints and what
//! an outer HTTP surface would put in a problem response.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// Moderation status other than APPROVED / REJECTED
    InvalidModerationStatus,
    /// Negative or zero amount where a positive one is required
    InvalidAmount,
    /// Vote for a submission that is not a side of the faceoff
    InvalidVote,

    // Resource Not Found
    CohortNotFound,
    SubmissionNotFound,
    FaceoffNotFound,
    MemberNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// A cycle of the same phase is already running
    CycleInProgress,
    /// Voter already voted in this faceoff
    DuplicateVote,
    /// Faceoff already resolved (or is a bye)
    FaceoffClosed,
    /// Faceoff (squad, week, slot) already exists
    FaceoffSlotTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Data problems
    /// Rows reference records that do not exist
    DataIntegrity,
    /// Not enough data to perform the operation
    InsufficientData,

    // System Errors
    /// Database / transaction failure
    TransactionFailed,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Unique constraint violation (SQLSTATE 23505)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidModerationStatus => "INVALID_MODERATION_STATUS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidVote => "INVALID_VOTE",

            Self::CohortNotFound => "COHORT_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::FaceoffNotFound => "FACEOFF_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::CycleInProgress => "CYCLE_IN_PROGRESS",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::FaceoffClosed => "FACEOFF_CLOSED",
            Self::FaceoffSlotTaken => "FACEOFF_SLOT_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::DataIntegrity => "DATA_INTEGRITY",
            Self::InsufficientData => "INSUFFICIENT_DATA",

            Self::TransactionFailed => "TRANSACTION_FAILED",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
