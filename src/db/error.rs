//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic; the SQLx conversion below is
//! the only place that knows about driver-level errors.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(aadhaar_users::db::not_found))]
    NotFound { entity_type: String, id: String },

    /// A UNIQUE index rejected the write. `field` is the offending column.
    #[error("Unique constraint violated on '{field}'")]
    #[diagnostic(code(aadhaar_users::db::unique_violation))]
    UniqueViolation { field: String },

    #[error("Invalid data: {message} (hint: {help})")]
    #[diagnostic(code(aadhaar_users::db::invalid_data))]
    InvalidData { message: String, help: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(aadhaar_users::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(aadhaar_users::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(aadhaar_users::db::connection_error))]
    Connection { message: String },

    #[error("Connection pool exhausted")]
    #[diagnostic(
        code(aadhaar_users::db::pool_exhausted),
        help("Increase AADHAAR_DB_MAX_CONNECTIONS or reduce concurrent load")
    )]
    PoolExhausted,
}

impl DbError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Column name without the table prefix, e.g. `email` for `users.email`.
    pub fn violated_column(&self) -> Option<&str> {
        match self {
            DbError::UniqueViolation { field } => {
                Some(field.rsplit('.').next().unwrap_or(field.as_str()))
            }
            _ => None,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → UniqueViolation when SQLite reports a UNIQUE failure
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::Connection
/// Other                       → DbError::Database
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // SQLite: "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.trim().to_string(),
                    }
                } else if db_err.is_unique_violation() {
                    DbError::UniqueViolation {
                        field: "unknown".to_string(),
                    }
                } else {
                    DbError::Database {
                        message: msg.to_string(),
                    }
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::Connection {
                message: "Pool is closed".to_string(),
            },
            other => DbError::Database {
                message: other.to_string(),
            },
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration {
            message: err.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
