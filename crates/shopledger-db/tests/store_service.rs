//! End-to-end scenarios driven through the StoreService façade.

use shopledger_core::validation::MAX_QUANTITY;
use shopledger_core::{Money, ProductId, ReportRow, SalesChannel};
use shopledger_db::{Database, DbConfig, DbError, ErrorKind, StoreService};

async fn started() -> StoreService {
    let mut service = StoreService::new(DbConfig::in_memory());
    service.start().await.unwrap();
    service
}

fn price(text: &str) -> Money {
    text.parse().unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn widget_sold_through_both_channels() {
    let mut service = started().await;

    let id = service.add_product("Widget", price("9.99")).await.unwrap();
    assert_eq!(id, ProductId::new(1));

    service.replenish_stock(id, 10).await.unwrap();
    let inventory = service.get_inventory().await.unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].product_id, id);
    assert_eq!(inventory[0].name, "Widget");
    assert_eq!(inventory[0].price, Money::from_cents(999));
    assert_eq!(inventory[0].quantity, 10);

    service.sell_in_store(id, 3).await.unwrap();
    service.sell_online(id, 2).await.unwrap();

    let report = service.get_report().await.unwrap();
    assert_eq!(
        report,
        vec![ReportRow::new(id, "Widget", Money::from_cents(999), 10, 3, 2, true).unwrap()]
    );
    assert_eq!(report[0].total_sold, 5);

    service.stop().await;
}

#[tokio::test]
async fn selling_unknown_product_writes_nothing() {
    let mut service = started().await;

    let err = service.sell_in_store(ProductId::new(999), 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(service.sales(SalesChannel::Store).await.unwrap().is_empty());
    assert!(service.sales(SalesChannel::Online).await.unwrap().is_empty());

    service.stop().await;
}

#[tokio::test]
async fn deactivated_product_cannot_be_sold() {
    let mut service = started().await;
    let id = service.add_product("Widget", price("9.99")).await.unwrap();

    service.deactivate_product(id).await.unwrap();

    for result in [
        service.sell_in_store(id, 1).await,
        service.sell_online(id, 1).await,
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InactiveProduct);
    }

    service.activate_product(id).await.unwrap();
    service.sell_in_store(id, 1).await.unwrap();

    service.stop().await;
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn new_products_get_fresh_ids_and_start_active() {
    let mut service = started().await;
    let mut ids = Vec::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta"] {
        ids.push(service.add_product(name, price("1.00")).await.unwrap());
    }

    // Strictly increasing implies never reissued
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let products = service.list_products().await.unwrap();
    assert!(products.iter().all(|p| p.is_active));

    service.stop().await;
}

#[tokio::test]
async fn replenish_is_accumulative() {
    let mut service = started().await;
    let split = service.add_product("Split", price("2.50")).await.unwrap();
    let whole = service.add_product("Whole", price("2.50")).await.unwrap();

    service.replenish_stock(split, 7).await.unwrap();
    service.replenish_stock(split, 5).await.unwrap();
    service.replenish_stock(whole, 12).await.unwrap();

    let split_row = service.find_product_by_id(split).await.unwrap().unwrap();
    let whole_row = service.find_product_by_id(whole).await.unwrap().unwrap();
    assert_eq!(split_row.quantity, whole_row.quantity);

    service.stop().await;
}

#[tokio::test]
async fn rejected_sales_leave_ledgers_untouched() {
    let mut service = started().await;
    let active = service.add_product("Active", price("3.00")).await.unwrap();
    let inactive = service.add_product("Inactive", price("3.00")).await.unwrap();
    service.deactivate_product(inactive).await.unwrap();

    let attempts = [
        (active, 0, ErrorKind::Validation),
        (active, -1, ErrorKind::Validation),
        (inactive, 1, ErrorKind::InactiveProduct),
        (ProductId::new(77), 1, ErrorKind::NotFound),
    ];
    for (id, qty, kind) in attempts {
        assert_eq!(service.sell_in_store(id, qty).await.unwrap_err().kind(), kind);
        assert_eq!(service.sell_online(id, qty).await.unwrap_err().kind(), kind);
    }

    assert!(service.sales(SalesChannel::Store).await.unwrap().is_empty());
    assert!(service.sales(SalesChannel::Online).await.unwrap().is_empty());

    service.stop().await;
}

#[tokio::test]
async fn report_has_one_row_per_product_ever_created() {
    let mut service = started().await;
    let a = service.add_product("Alpha", price("1.00")).await.unwrap();
    let b = service.add_product("Beta", price("2.00")).await.unwrap();
    let c = service.add_product("Gamma", price("0")).await.unwrap();
    service.replenish_stock(a, 4).await.unwrap();
    service.sell_online(a, 1).await.unwrap();
    service.deactivate_product(b).await.unwrap();

    let report = service.get_report().await.unwrap();

    assert_eq!(report.len(), 3);
    let ids: Vec<ProductId> = report.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert_eq!(
        report[2],
        ReportRow::new(c, "Gamma", Money::zero(), 0, 0, 0, true).unwrap()
    );
    assert!(!report[1].is_active);

    service.stop().await;
}

#[tokio::test]
async fn deactivate_is_idempotent_and_fails_identically_when_missing() {
    let mut service = started().await;
    let id = service.add_product("Widget", price("9.99")).await.unwrap();

    service.deactivate_product(id).await.unwrap();
    let before = service.get_report().await.unwrap();
    service.deactivate_product(id).await.unwrap();
    assert_eq!(service.get_report().await.unwrap(), before);

    let missing = ProductId::new(500);
    let first = service.deactivate_product(missing).await.unwrap_err();
    let second = service.deactivate_product(missing).await.unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
    assert!(matches!(first, DbError::NotFound { .. }));

    service.stop().await;
}

#[tokio::test]
async fn sales_do_not_decrement_stock() {
    // Inventory and the ledgers are independent. If sales ever start
    // reducing stock, this test must change along with that decision.
    let mut service = started().await;
    let id = service.add_product("Widget", price("9.99")).await.unwrap();
    service.replenish_stock(id, 10).await.unwrap();

    service.sell_in_store(id, 3).await.unwrap();
    service.sell_online(id, 20).await.unwrap();

    let item = service.find_product_by_id(id).await.unwrap().unwrap();
    assert_eq!(item.quantity, 10);

    service.stop().await;
}

#[tokio::test]
async fn invalid_catalog_input_is_rejected() {
    let mut service = started().await;

    let err = service.add_product("", price("1.00")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = service.add_product("Widget", price("-0.01")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(service.list_products().await.unwrap().is_empty());

    service.stop().await;
}

#[tokio::test]
async fn oversized_quantities_are_rejected_and_report_stays_readable() {
    let mut service = started().await;
    let id = service.add_product("Widget", price("9.99")).await.unwrap();

    service.replenish_stock(id, MAX_QUANTITY).await.unwrap();
    let err = service.replenish_stock(id, i64::MAX).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    service.sell_in_store(id, MAX_QUANTITY).await.unwrap();
    service.sell_online(id, 1).await.unwrap();
    let err = service.sell_in_store(id, i64::MAX).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let item = service.find_product_by_id(id).await.unwrap().unwrap();
    assert_eq!(item.quantity, MAX_QUANTITY);

    let row = service.get_report().await.unwrap().remove(0);
    assert_eq!(row.stock, MAX_QUANTITY);
    assert_eq!(row.total_sold, MAX_QUANTITY + 1);
    assert_eq!(
        row.revenue(),
        Some(Money::from_cents(999 * (MAX_QUANTITY + 1)))
    );

    service.stop().await;
}

// =============================================================================
// Rejected commits
// =============================================================================

/// Makes every insert into `table` carry a deferred foreign key to a product
/// that does not exist, so the statement succeeds and COMMIT fails.
async fn fail_commits_on(db: &Database, table: &str) {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS commit_guard (
             product_id INTEGER REFERENCES products (id) DEFERRABLE INITIALLY DEFERRED
         )",
    )
    .execute(db.pool())
    .await
    .unwrap();

    sqlx::query(&format!(
        "CREATE TRIGGER guard_{table} AFTER INSERT ON {table}
         BEGIN
             INSERT INTO commit_guard (product_id) VALUES (-1);
         END",
        table = table
    ))
    .execute(db.pool())
    .await
    .unwrap();
}

#[tokio::test]
async fn rejected_commit_surfaces_as_transaction_error() {
    let db = Database::open(DbConfig::in_memory()).await.unwrap();
    let mut service = StoreService::with_database(db.clone());
    let id = service.add_product("Widget", price("9.99")).await.unwrap();

    fail_commits_on(&db, "store_sales").await;
    fail_commits_on(&db, "storage").await;

    let err = service.sell_in_store(id, 1).await.unwrap_err();
    assert!(matches!(err, DbError::TransactionFailed(_)));
    assert_eq!(err.kind(), ErrorKind::Transaction);

    let err = service.replenish_stock(id, 5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transaction);

    // Re-querying shows the rolled-back state
    assert!(service.sales(SalesChannel::Store).await.unwrap().is_empty());
    assert_eq!(service.get_inventory().await.unwrap()[0].quantity, 0);

    // Unaffected paths keep committing
    service.sell_online(id, 2).await.unwrap();
    assert_eq!(service.get_report().await.unwrap()[0].online_sold, 2);

    service.stop().await;
}

// =============================================================================
// Connection lifecycle
// =============================================================================

#[tokio::test]
async fn data_survives_stop_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");

    let mut service = StoreService::new(DbConfig::new(&path));
    service.start().await.unwrap();
    let id = service.add_product("Widget", price("9.99")).await.unwrap();
    service.replenish_stock(id, 10).await.unwrap();
    service.sell_in_store(id, 3).await.unwrap();
    service.stop().await;

    let mut reopened = StoreService::new(DbConfig::new(&path).create_if_missing(false));
    reopened.start().await.unwrap();
    let report = reopened.get_report().await.unwrap();
    assert_eq!(
        report,
        vec![ReportRow::new(id, "Widget", Money::from_cents(999), 10, 3, 0, true).unwrap()]
    );

    // IDs keep increasing after a restart
    let next = reopened.add_product("Gadget", price("1.00")).await.unwrap();
    assert!(next > id);

    reopened.stop().await;
}

#[tokio::test]
async fn missing_file_without_create_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");

    let mut service = StoreService::new(DbConfig::new(&path).create_if_missing(false));
    let err = service.start().await.unwrap_err();

    assert!(matches!(err, DbError::ConnectionFailed(_)));
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!path.exists());

    service.stop().await;
}

#[tokio::test]
async fn stop_is_idempotent_and_blocks_further_calls() {
    let mut service = started().await;

    service.stop().await;
    service.stop().await;

    let err = service.get_report().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn concurrent_writers_on_shared_handle_are_serialized() {
    let db = Database::open(DbConfig::in_memory()).await.unwrap();
    let id = db.products().create("Widget", price("9.99")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..5 {
                db.inventory().replenish(id, 1).await.unwrap();
                db.sales(SalesChannel::Online).record_sale(id, 1).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(db.inventory().stock_of(id).await.unwrap(), 40);
    assert_eq!(db.sales(SalesChannel::Online).count().await.unwrap(), 40);

    db.close().await;
}
