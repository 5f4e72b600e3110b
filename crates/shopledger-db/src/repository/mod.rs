//! # Repository Module
//!
//! Database repository implementations for ShopLedger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  StoreService                                                           │
//! │       │                                                                 │
//! │       │  db.products().create("Widget", price)                          │
//! │       ▼                                                                 │
//! │  ProductRepository    create, exists, is_active, (de)activate           │
//! │  InventoryRepository  replenish, list_inventory, stock_of               │
//! │  SalesLedger × 2      record_sale, list, count, total_for               │
//! │  ReportRepository     build                                             │
//! │       │                                                                 │
//! │       │  SQL (writes through Database::begin_write)                     │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the shared [`crate::Database`] handle.
//! Validation happens here, next to the data, and is never corrected silently.

pub mod inventory;
pub mod product;
pub mod report;
pub mod sale;
