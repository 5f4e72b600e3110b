//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / CoreError / ValidationError                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ErrorKind  ← Connection | Validation | NotFound |                      │
//! │               InactiveProduct | Transaction                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreService caller (unchanged, never swallowed or retried)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopledger_core::{CoreError, ProductId, ValidationError};
use std::fmt;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database could not be opened or the session was lost.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and `create_if_missing` is off
    /// - Directory missing or not writable
    /// - Pool closed while an operation was in flight
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An operation was issued before `start()` or after `stop()`.
    #[error("Store is not connected")]
    NotConnected,

    /// Schema bootstrap failed during open.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Malformed input (empty name, negative price, quantity <= 0).
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Sale attempted against a deactivated product.
    #[error("Product {id} is inactive")]
    InactiveProduct { id: ProductId },

    /// Commit rejected by the store. Persistence of the write is unknown;
    /// re-query before retrying.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Statement rejected by the backend.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Kind
// =============================================================================

/// The five failure categories callers handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Session unavailable. Fatal to the operation, no retry.
    Connection,
    /// Caller must correct the input and resubmit.
    Validation,
    /// Referenced product is absent.
    NotFound,
    /// Sale against a deactivated product.
    InactiveProduct,
    /// The backend rejected a statement or returned data that could not be
    /// decoded. After a write, persistence is unknown and the caller should
    /// re-query before retrying. After a read nothing changed, so the same
    /// re-query is safe.
    Transaction,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InactiveProduct => "inactive_product",
            ErrorKind::Transaction => "transaction",
        };
        f.write_str(label)
    }
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Collapses the variant into its failure category.
    ///
    /// ```text
    /// ConnectionFailed, NotConnected, MigrationFailed  → Connection
    /// Validation                                       → Validation
    /// NotFound                                         → NotFound
    /// InactiveProduct                                  → InactiveProduct
    /// TransactionFailed, ForeignKeyViolation,
    /// QueryFailed, Internal                            → Transaction
    /// ```
    ///
    /// `QueryFailed` and `Internal` also come out of pure reads (a statement
    /// error, a column that fails to decode). They share `Transaction` because
    /// no input change can fix them; reads never leave partial state behind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::ConnectionFailed(_) | DbError::NotConnected | DbError::MigrationFailed(_) => {
                ErrorKind::Connection
            }
            DbError::Validation(_) => ErrorKind::Validation,
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::InactiveProduct { .. } => ErrorKind::InactiveProduct,
            DbError::TransactionFailed(_)
            | DbError::ForeignKeyViolation { .. }
            | DbError::QueryFailed(_)
            | DbError::Internal(_) => ErrorKind::Transaction,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → DbError::NotFound
/// sqlx::Error::Database             → FK violation or QueryFailed
/// PoolClosed / PoolTimedOut / Io    → DbError::ConnectionFailed
/// Other                             → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports FK failures as "FOREIGN KEY constraint failed"
                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("Timed out acquiring a connection".to_string())
            }

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::Configuration(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Converts domain rule violations.
impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => DbError::not_found("Product", id),
            CoreError::InactiveProduct(id) => DbError::InactiveProduct { id },
            CoreError::Validation(e) => DbError::Validation(e),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
