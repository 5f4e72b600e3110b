//! # Inventory Repository
//!
//! Per-product stock quantity with additive replenishment.
//!
//! ## Replenish Is an Upsert-With-Addition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  replenish(1, 10)   no storage row  → INSERT (1, 10)                    │
//! │  replenish(1, 5)    row exists      → read 10, checked 10 + 5, write 15 │
//! │                                                                         │
//! │  Never a set: replenish(q1) then replenish(q2) == replenish(q1 + q2)    │
//! │  Read and write share one write transaction; overflow is a              │
//! │  Validation error and leaves the row untouched.                         │
//! │                                                                         │
//! │  listing:  products LEFT JOIN storage  (missing row → quantity 0)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::product::{fetch_active_flag, ProductRepository};
use shopledger_core::validation::{add_to_stock, validate_quantity};
use shopledger_core::{InventoryItem, ProductId};

/// Repository for stock levels.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: Database,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(db: Database) -> Self {
        InventoryRepository { db }
    }

    /// Adds `quantity` units to a product's stock.
    ///
    /// Creates the stock record on first replenishment. Inactive products
    /// can still be replenished.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - `quantity` outside `1..=MAX_QUANTITY`, or
    ///   the new stock level would overflow
    /// * `Err(DbError::NotFound)` - Product was never created
    pub async fn replenish(&self, id: ProductId, quantity: i64) -> DbResult<()> {
        validate_quantity(quantity)?;

        debug!(product_id = %id, quantity, "Replenishing stock");

        let mut txn = self.db.begin_write().await?;

        if fetch_active_flag(txn.conn(), id).await?.is_none() {
            return Err(DbError::not_found("Product", id));
        }

        let current: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM storage WHERE product_id = ?1")
                .bind(id)
                .fetch_optional(txn.conn())
                .await?;
        let stock = add_to_stock(current.unwrap_or(0), quantity)?;

        sqlx::query(
            r#"
            INSERT INTO storage (product_id, quantity, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (product_id) DO UPDATE SET
                quantity = excluded.quantity,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id)
        .bind(stock)
        .bind(Utc::now())
        .execute(txn.conn())
        .await?;

        txn.commit().await?;

        info!(product_id = %id, quantity, stock, "Stock replenished");
        Ok(())
    }

    /// Every catalog product joined with its stock, by ascending ID.
    ///
    /// Includes inactive products. Missing stock reads as 0. The whole
    /// listing is materialized at call time.
    pub async fn list_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                p.price_cents AS price,
                COALESCE(s.quantity, 0) AS quantity
            FROM products p
            LEFT JOIN storage s ON s.product_id = p.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        debug!(count = items.len(), "Inventory listed");
        Ok(items)
    }

    /// Current stock of one product, 0 when it has no stock record.
    pub async fn stock_of(&self, id: ProductId) -> DbResult<i64> {
        let quantity: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM storage WHERE product_id = ?1")
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(quantity.unwrap_or(0))
    }

    /// Sale-gate view of the catalog flag. Absent products read as `false`.
    pub async fn is_stock_record_active(&self, id: ProductId) -> DbResult<bool> {
        ProductRepository::new(self.db.clone()).is_active(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
