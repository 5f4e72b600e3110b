//! # Sales Ledger
//!
//! Append-only sale records, one ledger per sales channel.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale(id, qty)                              │
//! │                                                                         │
//! │  begin_write()                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read is_active ──► ensure_sellable                                     │
//! │       │               ├── absent     → NotFound         (rollback)      │
//! │       │               ├── inactive   → InactiveProduct  (rollback)      │
//! │       │               └── qty ∉ 1..=MAX → Validation    (rollback)      │
//! │       ▼                                                                 │
//! │  INSERT INTO store_sales | online_sales                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit() ──► failure = TransactionFailed (persistence unknown)         │
//! │                                                                         │
//! │  Stock is NOT decremented. Inventory and sales are tracked apart.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::product::fetch_active_flag;
use shopledger_core::validation::ensure_sellable;
use shopledger_core::{ProductId, SaleRecord, SalesChannel};

/// The sales ledger of one channel.
#[derive(Debug, Clone)]
pub struct SalesLedger {
    db: Database,
    channel: SalesChannel,
}

impl SalesLedger {
    /// Creates the ledger for `channel`.
    pub fn new(db: Database, channel: SalesChannel) -> Self {
        SalesLedger { db, channel }
    }

    fn table(&self) -> &'static str {
        match self.channel {
            SalesChannel::Store => "store_sales",
            SalesChannel::Online => "online_sales",
        }
    }

    /// Validates and appends one sale.
    ///
    /// Checks run in a fixed order: the product must exist, then be active,
    /// then `quantity` must be in `1..=MAX_QUANTITY`. Any failure leaves the
    /// ledger untouched.
    pub async fn record_sale(&self, product_id: ProductId, quantity: i64) -> DbResult<SaleRecord> {
        debug!(
            product_id = %product_id,
            quantity,
            channel = %self.channel,
            "Recording sale"
        );

        let mut txn = self.db.begin_write().await?;

        let active = fetch_active_flag(txn.conn(), product_id).await?;
        ensure_sellable(product_id, active, quantity)?;

        let sold_at = Utc::now();
        let sql = format!(
            "INSERT INTO {} (product_id, quantity, sold_at) VALUES (?1, ?2, ?3)",
            self.table()
        );
        let result = sqlx::query(&sql)
            .bind(product_id)
            .bind(quantity)
            .bind(sold_at)
            .execute(txn.conn())
            .await?;

        let record = SaleRecord {
            id: result.last_insert_rowid(),
            product_id,
            quantity,
            sold_at,
            channel: self.channel,
        };

        txn.commit().await?;

        info!(
            sale_id = record.id,
            product_id = %product_id,
            quantity,
            channel = %self.channel,
            "Sale recorded"
        );
        Ok(record)
    }

    /// Every record in this ledger, oldest first.
    pub async fn list(&self) -> DbResult<Vec<SaleRecord>> {
        let sql = format!(
            r#"
            SELECT
                id,
                product_id,
                quantity,
                sold_at,
                '{}' AS channel
            FROM {}
            ORDER BY id
            "#,
            self.channel.as_str(),
            self.table()
        );

        let records = sqlx::query_as::<_, SaleRecord>(&sql)
            .fetch_all(self.db.pool())
            .await?;

        Ok(records)
    }

    /// Number of records in this ledger.
    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.db.pool()).await?;

        Ok(count)
    }

    /// Total quantity sold of one product through this channel.
    pub async fn total_for(&self, product_id: ProductId) -> DbResult<i64> {
        let sql = format!(
            "SELECT COALESCE(SUM(quantity), 0) FROM {} WHERE product_id = ?1",
            self.table()
        );
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(product_id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
