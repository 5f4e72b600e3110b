//! # Validation Module
//!
//! Input validation and sale eligibility rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (argument parsing)                                        │
//! │  └── Type validation (integer IDs, decimal prices)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repositories (shopledger-db)                                  │
//! │  └── THIS MODULE: business rule validation, run by the component        │
//! │      closest to the data                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── CHECK constraints (quantity, price)                                │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ProductId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Largest quantity one replenishment or sale may carry.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use shopledger_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Widget ").unwrap(), "Widget");
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use shopledger_core::money::Money;
/// use shopledger_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a replenishment or sale quantity (`1..=MAX_QUANTITY`).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Adds a replenishment to the current stock level.
///
/// Fails instead of wrapping when the new level would not fit in an `i64`.
///
/// ## Example
/// ```rust
/// use shopledger_core::validation::add_to_stock;
///
/// assert_eq!(add_to_stock(10, 5).unwrap(), 15);
/// assert!(add_to_stock(i64::MAX, 1).is_err());
/// ```
pub fn add_to_stock(current: i64, qty: i64) -> ValidationResult<i64> {
    current
        .checked_add(qty)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        })
}

/// Validates an operator-entered product ID.
pub fn validate_product_id(id: i64) -> ValidationResult<ProductId> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    Ok(ProductId::new(id))
}

// =============================================================================
// Sale Gate
// =============================================================================

/// Decides whether a sale may be appended to a ledger.
///
/// `active` is the product's flag as read from the catalog, `None` when the
/// product does not exist.
///
/// ## Check Order
/// ```text
/// active == None         → ProductNotFound
/// active == Some(false)  → InactiveProduct
/// quantity <= 0          → Validation(MustBePositive)
/// otherwise              → Ok
/// ```
///
/// The order is observable: an unknown product with a bad quantity reports
/// `ProductNotFound`, not a validation error.
pub fn ensure_sellable(product_id: ProductId, active: Option<bool>, quantity: i64) -> CoreResult<()> {
    match active {
        None => return Err(CoreError::ProductNotFound(product_id)),
        Some(false) => return Err(CoreError::InactiveProduct(product_id)),
        Some(true) => {}
    }

    validate_quantity(quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Widget").unwrap(), "Widget");
        assert_eq!(validate_product_name("  Widget  ").unwrap(), "Widget");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("\t\n").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_PRODUCT_NAME_LEN)).is_ok());
        assert!(validate_product_name(&"A".repeat(MAX_PRODUCT_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(-100)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_quantity_upper_bound() {
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(MAX_QUANTITY + 1),
            Err(ValidationError::OutOfRange { max: MAX_QUANTITY, .. })
        ));
        assert!(matches!(
            validate_quantity(i64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_to_stock_refuses_overflow() {
        assert_eq!(add_to_stock(0, MAX_QUANTITY), Ok(MAX_QUANTITY));
        assert_eq!(add_to_stock(i64::MAX - 1, 1), Ok(i64::MAX));
        assert!(matches!(
            add_to_stock(i64::MAX, 1),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "stock"
        ));
    }

    #[test]
    fn test_validate_product_id() {
        assert_eq!(validate_product_id(5).unwrap(), ProductId::new(5));
        assert!(validate_product_id(0).is_err());
        assert!(validate_product_id(-3).is_err());
    }

    #[test]
    fn test_ensure_sellable_check_order() {
        let id = ProductId::new(9);

        assert_eq!(
            ensure_sellable(id, None, 0),
            Err(CoreError::ProductNotFound(id))
        );
        assert_eq!(
            ensure_sellable(id, Some(false), 0),
            Err(CoreError::InactiveProduct(id))
        );
        assert!(matches!(
            ensure_sellable(id, Some(true), 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            ensure_sellable(id, Some(true), MAX_QUANTITY + 1),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(ensure_sellable(id, Some(true), 3), Ok(()));
    }
}
