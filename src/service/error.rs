//! Service error taxonomy.
//!
//! Every failure leaving the service is one of these variants. Store errors
//! are translated here; their text is kept as `source` for logging and never
//! appears in the `Display` output returned to callers.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::validation::FieldViolation;

/// Which unique field collided.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    #[error("Email already exists")]
    EmailExists,
    #[error("Aadhaar application ID already exists")]
    ApplicationIdExists,
}

impl ConflictKind {
    /// Map a violated column name from the store to a conflict kind.
    pub fn from_column(column: &str) -> Self {
        if column == "email" {
            ConflictKind::EmailExists
        } else {
            ConflictKind::ApplicationIdExists
        }
    }
}

/// The service operation that failed, used in internal error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    List,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create user"),
            Operation::Get => write!(f, "retrieve user"),
            Operation::List => write!(f, "retrieve users"),
            Operation::Delete => write!(f, "delete user"),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ServiceError {
    #[error("Validation failed")]
    #[diagnostic(code(aadhaar_users::service::invalid))]
    Invalid { details: Vec<FieldViolation> },

    #[error("Invalid user ID format")]
    #[diagnostic(
        code(aadhaar_users::service::invalid_format),
        help("User IDs are UUIDs, e.g. 7c9e6679-7425-40de-944b-e07fc1f90ae7")
    )]
    InvalidFormat { value: String },

    #[error("{0}")]
    #[diagnostic(code(aadhaar_users::service::conflict))]
    Conflict(ConflictKind),

    #[error("User not found")]
    #[diagnostic(code(aadhaar_users::service::not_found))]
    NotFound { id: String },

    #[error("Failed to {operation}")]
    #[diagnostic(code(aadhaar_users::service::internal))]
    Internal {
        operation: Operation,
        #[source]
        source: DbError,
    },
}

impl ServiceError {
    pub fn internal(operation: Operation, source: DbError) -> Self {
        ServiceError::Internal { operation, source }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
