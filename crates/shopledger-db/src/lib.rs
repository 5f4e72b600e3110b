//! # shopledger-db: Database Layer for ShopLedger
//!
//! This crate provides persistence and the [`StoreService`] façade.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopLedger Data Flow                             │
//! │                                                                         │
//! │  shopledger CLI (sell-store 1 3)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  shopledger-db (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │ StoreService  │───►│  Repositories │───►│   Database   │    │    │
//! │  │   │ (service.rs)  │    │ product       │    │  (pool.rs)   │    │    │
//! │  │   │               │    │ inventory     │    │ SqlitePool   │    │    │
//! │  │   │ start / stop  │    │ sale × 2      │    │ write lock   │    │    │
//! │  │   │               │    │ report        │    │ migrations   │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     SQLite Database                             │    │
//! │  │   products, storage, store_sales, online_sales                  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, write serialization, configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and the failure taxonomy
//! - [`repository`] - Catalog, inventory, sales ledgers, reporting
//! - [`service`] - The StoreService façade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopledger_db::{DbConfig, StoreService};
//!
//! let mut service = StoreService::new(DbConfig::new("path/to/shop.db"));
//! service.start().await?;
//!
//! let id = service.add_product("Widget", "9.99".parse()?).await?;
//! service.sell_online(id, 2).await?;
//! let report = service.get_report().await?;
//!
//! service.stop().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, ErrorKind};
pub use pool::{Database, DbConfig, WriteTxn};
pub use service::StoreService;

// Repository re-exports for convenience
pub use repository::inventory::InventoryRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SalesLedger;
