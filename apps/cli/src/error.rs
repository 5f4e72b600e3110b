//! # CLI Error Type
//!
//! Unified error type for every command, mapped to a process exit code.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  ConfigError ─────────────┐                                             │
//! │  DbError (by kind) ───────┼──► CliError { code, message }               │
//! │  io / serde_json error ───┘          │                                  │
//! │                                      ├──► stderr (text or JSON)         │
//! │                                      └──► exit code                     │
//! │                                                                         │
//! │  clap usage errors exit with ErrorCode::Usage before anything opens.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use crate::config::ConfigError;
use shopledger_db::{DbError, ErrorKind};

/// Error reported by the `shopledger` binary.
///
/// ## Serialization
/// With `--json`, this is what lands on stderr:
/// ```json
/// {
///   "code": "INACTIVE_PRODUCT",
///   "message": "Product 1 is inactive"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad command line
    Usage,
    /// Input rejected by a validation rule
    Validation,
    /// Referenced product is absent
    NotFound,
    /// Sale against a deactivated product
    InactiveProduct,
    /// Store rejected the write; re-query before retrying
    Transaction,
    /// Database unreachable or not started
    Connection,
    /// Bad environment configuration
    Config,
    /// Writing output failed
    Io,
}

impl ErrorCode {
    /// Process exit code. 0 is reserved for success.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Usage => 2,
            ErrorCode::Validation => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::InactiveProduct => 5,
            ErrorCode::Transaction => 6,
            ErrorCode::Connection => 7,
            ErrorCode::Config => 8,
            ErrorCode::Io => 9,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }
}

/// Converts database errors by their failure category.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        let code = match err.kind() {
            ErrorKind::Connection => ErrorCode::Connection,
            ErrorKind::Validation => ErrorCode::Validation,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InactiveProduct => ErrorCode::InactiveProduct,
            ErrorKind::Transaction => {
                tracing::error!(error = %err, "Store rejected the statement; re-query before retrying");
                ErrorCode::Transaction
            }
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::new(ErrorCode::Io, err.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

// =============================================================================
// Unit Tests
// =============================================================================
