//! # Report Repository
//!
//! Read-only aggregation over catalog, inventory and both ledgers.
//!
//! ```text
//!  products ──LEFT JOIN── storage            → stock (0 if absent)
//!     │
//!     ├── Σ store_sales.quantity  (subquery) → store_sold (0 if none)
//!     └── Σ online_sales.quantity (subquery) → online_sold (0 if none)
//!
//!  total_sold = store_sold + online_sold, checked in ReportRow::new
//! ```
//!
//! Each ledger is summed in its own correlated subquery. Joining both sales
//! tables directly would multiply rows and inflate both sums.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use shopledger_core::{Money, ProductId, ReportRow};

/// Builds the consolidated per-product report.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Database,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(db: Database) -> Self {
        ReportRepository { db }
    }

    /// One row per product ever created, active or not, by ascending ID.
    ///
    /// A total that does not fit in an `i64` fails the whole report with
    /// `DbError::Validation` rather than wrapping.
    pub async fn build(&self) -> DbResult<Vec<ReportRow>> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id,
                p.name,
                p.price_cents,
                COALESCE(s.quantity, 0) AS stock,
                (SELECT COALESCE(SUM(ss.quantity), 0)
                   FROM store_sales ss
                  WHERE ss.product_id = p.id) AS store_sold,
                (SELECT COALESCE(SUM(os.quantity), 0)
                   FROM online_sales os
                  WHERE os.product_id = p.id) AS online_sold,
                p.is_active
            FROM products p
            LEFT JOIN storage s ON s.product_id = p.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let report = rows
            .iter()
            .map(report_row)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(rows = report.len(), "Report built");
        Ok(report)
    }
}

fn report_row(row: &SqliteRow) -> DbResult<ReportRow> {
    Ok(ReportRow::new(
        row.try_get::<ProductId, _>("id")?,
        row.try_get::<String, _>("name")?,
        row.try_get::<Money, _>("price_cents")?,
        row.try_get("stock")?,
        row.try_get("store_sold")?,
        row.try_get("online_sold")?,
        row.try_get("is_active")?,
    )?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pool::DbConfig;
    use chrono::Utc;
    use shopledger_core::SalesChannel;

    async fn setup() -> Database {
        Database::open(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_catalog_gives_empty_report() {
        let db = setup().await;

        assert!(db.reports().build().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_untouched_product_has_all_zero_row() {
        let db = setup().await;
        let id = db.products().create("Gadget", Money::from_cents(150)).await.unwrap();

        let report = db.reports().build().await.unwrap();

        assert_eq!(
            report,
            vec![ReportRow::new(id, "Gadget", Money::from_cents(150), 0, 0, 0, true).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_multiple_sales_per_channel_are_not_double_counted() {
        let db = setup().await;
        let id = db.products().create("Widget", Money::from_cents(999)).await.unwrap();
        db.inventory().replenish(id, 20).await.unwrap();

        let store = db.sales(SalesChannel::Store);
        let online = db.sales(SalesChannel::Online);
        store.record_sale(id, 1).await.unwrap();
        store.record_sale(id, 2).await.unwrap();
        online.record_sale(id, 4).await.unwrap();
        online.record_sale(id, 5).await.unwrap();
        online.record_sale(id, 6).await.unwrap();

        let row = db.reports().build().await.unwrap().remove(0);

        assert_eq!(row.stock, 20);
        assert_eq!(row.store_sold, 3);
        assert_eq!(row.online_sold, 15);
        assert_eq!(row.total_sold, 18);
    }

    #[tokio::test]
    async fn test_inactive_products_are_kept_and_marked() {
        let db = setup().await;
        let products = db.products();
        let a = products.create("Alpha", Money::from_cents(100)).await.unwrap();
        let b = products.create("Beta", Money::from_cents(200)).await.unwrap();
        db.sales(SalesChannel::Store).record_sale(b, 2).await.unwrap();
        products.deactivate(b).await.unwrap();

        let report = db.reports().build().await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].product_id, a);
        assert!(report[0].is_active);
        assert_eq!(report[1].product_id, b);
        assert!(!report[1].is_active);
        assert_eq!(report[1].store_sold, 2);
        assert_eq!(report[1].status_label(), "inactive");
    }

    #[tokio::test]
    async fn test_total_overflow_fails_without_panicking() {
        let db = setup().await;
        let id = db.products().create("Widget", Money::from_cents(999)).await.unwrap();
        for (table, quantity) in [("store_sales", i64::MAX), ("online_sales", 1)] {
            sqlx::query(&format!(
                "INSERT INTO {} (product_id, quantity, sold_at) VALUES (?1, ?2, ?3)",
                table
            ))
            .bind(id)
            .bind(quantity)
            .bind(Utc::now())
            .execute(db.pool())
            .await
            .unwrap();
        }

        let err = db.reports().build().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
