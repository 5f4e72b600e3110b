//! # Error Types
//!
//! Domain-specific error types for shopledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopledger-core errors (this file)                                     │
//! │  ├── CoreError        - Sale eligibility / lookup failures              │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  shopledger-db errors (separate crate)                                  │
//! │  └── DbError          - Connection, transaction and query failures      │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── CliError         - What the operator sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CliError → exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The referenced product was never created.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product exists but has been deactivated.
    ///
    /// ## When This Occurs
    /// ```text
    /// deactivate(7)
    ///      │
    ///      ▼
    /// sell_in_store(7, 1)
    ///      │
    ///      ▼
    /// InactiveProduct(7)  ← no sale row is written
    /// ```
    #[error("Product {0} is inactive and cannot be sold")]
    InactiveProduct(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the component closest to the data, never silently corrected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InactiveProduct(ProductId::new(3));
        assert_eq!(err.to_string(), "Product 3 is inactive and cannot be sold");

        let err = CoreError::ProductNotFound(ProductId::new(999));
        assert_eq!(err.to_string(), "Product not found: 999");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
