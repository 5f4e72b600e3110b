//! # Domain Types
//!
//! Core domain types used throughout ShopLedger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │  InventoryItem  │   │   SaleRecord    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (int)       │   │  product_id     │   │  id (seq)       │        │
//! │  │  name           │   │  name, price    │   │  product_id     │        │
//! │  │  price (Money)  │   │  quantity ≥ 0   │   │  quantity > 0   │        │
//! │  │  is_active      │   └─────────────────┘   │  sold_at        │        │
//! │  └─────────────────┘                         │  channel        │        │
//! │                                              └─────────────────┘        │
//! │  ┌─────────────────┐   ┌──────────────────────────────────────┐         │
//! │  │  SalesChannel   │   │  ReportRow (derived, never stored)   │         │
//! │  │  Store | Online │   │  stock, store_sold, online_sold, ... │         │
//! │  └─────────────────┘   └──────────────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are fixed-shape records with named fields; nothing in the crate
//! reads a row positionally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

// =============================================================================
// Product ID
// =============================================================================

/// Store-assigned product identifier.
///
/// Assigned on creation, monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// Products are never physically deleted. Deactivation clears `is_active`
/// so historical sales keep their reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,

    /// Display name, stored trimmed.
    pub name: String,

    /// Unit price, never negative.
    #[serde(rename = "price_cents")]
    pub price: Money,

    /// Soft-delete flag. Inactive products cannot be sold.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// One row of the inventory listing: a catalog product joined with its stock.
///
/// `quantity` is 0 when the product has never been replenished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub quantity: i64,
}

// =============================================================================
// Sales Channel
// =============================================================================

/// One of the two independent sales paths, each with its own ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    /// Physical store counter.
    Store,
    /// Online shop.
    Online,
}

impl SalesChannel {
    /// Both channels, in report column order.
    pub const ALL: [SalesChannel; 2] = [SalesChannel::Store, SalesChannel::Online];

    /// Lowercase label, matching the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SalesChannel::Store => "store",
            SalesChannel::Online => "online",
        }
    }
}

impl fmt::Display for SalesChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// An appended, immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    /// Per-ledger sequence number assigned on insert.
    pub id: i64,
    pub product_id: ProductId,
    /// Always > 0.
    pub quantity: i64,
    pub sold_at: DateTime<Utc>,
    pub channel: SalesChannel,
}

// =============================================================================
// Report Row
// =============================================================================

/// Denormalized per-product view over catalog, inventory and both ledgers.
///
/// Recomputed on every request. Inactive products are kept and marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    /// Current stock, 0 when no stock record exists.
    pub stock: i64,
    pub store_sold: i64,
    pub online_sold: i64,
    /// Always `store_sold + online_sold`.
    pub total_sold: i64,
    pub is_active: bool,
}

impl ReportRow {
    /// Builds a row, deriving `total_sold` from the two channel sums.
    ///
    /// Fails with `OutOfRange` when the total does not fit in an `i64`.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Money,
        stock: i64,
        store_sold: i64,
        online_sold: i64,
        is_active: bool,
    ) -> ValidationResult<Self> {
        let total_sold =
            store_sold
                .checked_add(online_sold)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "total_sold".to_string(),
                    min: 0,
                    max: i64::MAX,
                })?;

        Ok(ReportRow {
            product_id,
            name: name.into(),
            price,
            stock,
            store_sold,
            online_sold,
            total_sold,
            is_active,
        })
    }

    /// Quantity sold through one channel.
    pub fn sold_via(&self, channel: SalesChannel) -> i64 {
        match channel {
            SalesChannel::Store => self.store_sold,
            SalesChannel::Online => self.online_sold,
        }
    }

    /// Gross sales value at the current catalog price, `None` on overflow.
    pub fn revenue(&self) -> Option<Money> {
        self.price.checked_mul(self.total_sold)
    }

    /// Status marker shown in reports.
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
