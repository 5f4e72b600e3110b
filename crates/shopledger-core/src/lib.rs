//! # shopledger-core: Pure Domain Logic for ShopLedger
//!
//! Domain types and rules for a retail catalog, per-product stock and a
//! two-channel sales ledger. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopLedger Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    shopledger CLI                               │    │
//! │  │    add-product, replenish, sell-store, sell-online, report      │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │         shopledger-db (StoreService + repositories)             │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ shopledger-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐   │    │
//! │  │   │   types   │  │   money   │  │ validation │  │   error   │   │    │
//! │  │   │  Product  │  │   Money   │  │  sale gate │  │ CoreError │   │    │
//! │  │   │ ReportRow │  │  parsing  │  │  checks    │  │           │   │    │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, InventoryItem, SaleRecord, ReportRow)
//! - [`money`] - Money type with integer cents and decimal parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and the sale gate
//!
//! ## Example Usage
//!
//! ```rust
//! use shopledger_core::validation::ensure_sellable;
//! use shopledger_core::{CoreError, ProductId};
//!
//! let id = ProductId::new(1);
//! assert!(ensure_sellable(id, Some(true), 3).is_ok());
//! assert_eq!(
//!     ensure_sellable(id, Some(false), 3),
//!     Err(CoreError::InactiveProduct(id))
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
