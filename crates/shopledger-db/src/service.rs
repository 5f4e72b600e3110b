//! # Store Service
//!
//! The orchestrating façade: one cohesive API over catalog, inventory, the
//! two sales ledgers and reporting.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      StoreService Lifecycle                             │
//! │                                                                         │
//! │  StoreService::new(config)      not started, no connection              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  start() ──► Database::open      ConnectionFailed / MigrationFailed     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_product, replenish_stock, sell_in_store, sell_online,              │
//! │  get_inventory, get_report, find_product_by_id, ...                     │
//! │       │         (errors pass through unchanged, never retried)          │
//! │       ▼                                                                 │
//! │  stop() ──► Database::close      idempotent, safe after failed start    │
//! │                                                                         │
//! │  Any operation outside start()/stop() fails with NotConnected.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service owns no domain state. It holds the single [`Database`]
//! handle and passes it to each repository per call.

use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::{Database, DbConfig};
use shopledger_core::{InventoryItem, Money, Product, ProductId, ReportRow, SaleRecord, SalesChannel};

/// The façade external callers use.
///
/// ## Usage
/// ```rust,ignore
/// let mut service = StoreService::new(DbConfig::new("shop.db"));
/// service.start().await?;
///
/// let result = async {
///     let id = service.add_product("Widget", "9.99".parse()?).await?;
///     service.replenish_stock(id, 10).await?;
///     service.sell_in_store(id, 3).await
/// }
/// .await;
///
/// service.stop().await; // runs whether or not `result` is an error
/// result?;
/// ```
#[derive(Debug)]
pub struct StoreService {
    config: Option<DbConfig>,
    db: Option<Database>,
}

impl StoreService {
    /// Creates a service that will open `config` on [`StoreService::start`].
    pub fn new(config: DbConfig) -> Self {
        StoreService {
            config: Some(config),
            db: None,
        }
    }

    /// Wraps an already open database handle. The service starts out started.
    pub fn with_database(db: Database) -> Self {
        StoreService {
            config: None,
            db: Some(db),
        }
    }

    /// Opens the connection. Calling it on a started service is a no-op.
    pub async fn start(&mut self) -> DbResult<()> {
        if self.db.is_some() {
            debug!("Store service already started");
            return Ok(());
        }

        let config = self.config.clone().ok_or(DbError::NotConnected)?;
        let db = Database::open(config).await?;
        self.db = Some(db);

        info!("Store service started");
        Ok(())
    }

    /// Releases the connection.
    ///
    /// Idempotent, and safe after a failed [`StoreService::start`].
    pub async fn stop(&mut self) {
        match self.db.take() {
            Some(db) => {
                db.close().await;
                info!("Store service stopped");
            }
            None => debug!("Store service not running"),
        }
    }

    /// True between a successful `start()` and the next `stop()`.
    pub fn is_started(&self) -> bool {
        self.db.is_some()
    }

    fn db(&self) -> DbResult<&Database> {
        self.db.as_ref().ok_or(DbError::NotConnected)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Adds an active product and returns its new ID.
    pub async fn add_product(&self, name: &str, price: Money) -> DbResult<ProductId> {
        self.db()?.products().create(name, price).await
    }

    /// Marks a product as not sellable. Fails with NotFound if absent.
    pub async fn deactivate_product(&self, id: ProductId) -> DbResult<()> {
        self.db()?.products().deactivate(id).await
    }

    /// Makes a product sellable again. Fails with NotFound if absent.
    pub async fn activate_product(&self, id: ProductId) -> DbResult<()> {
        self.db()?.products().activate(id).await
    }

    /// Every catalog entry, active or not.
    pub async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.db()?.products().list().await
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Adds `quantity` units to a product's stock.
    pub async fn replenish_stock(&self, id: ProductId, quantity: i64) -> DbResult<()> {
        self.db()?.inventory().replenish(id, quantity).await
    }

    /// Every product with its current stock, by ascending ID.
    pub async fn get_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        self.db()?.inventory().list_inventory().await
    }

    /// First inventory entry with the given ID, `None` if absent.
    ///
    /// A linear scan over the inventory listing.
    pub async fn find_product_by_id(&self, id: ProductId) -> DbResult<Option<InventoryItem>> {
        let items = self.get_inventory().await?;
        Ok(items.into_iter().find(|item| item.product_id == id))
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale through the store channel. Stock is not decremented.
    pub async fn sell_in_store(&self, id: ProductId, quantity: i64) -> DbResult<()> {
        self.sell(SalesChannel::Store, id, quantity).await
    }

    /// Records a sale through the online channel. Stock is not decremented.
    pub async fn sell_online(&self, id: ProductId, quantity: i64) -> DbResult<()> {
        self.sell(SalesChannel::Online, id, quantity).await
    }

    async fn sell(&self, channel: SalesChannel, id: ProductId, quantity: i64) -> DbResult<()> {
        self.db()?.sales(channel).record_sale(id, quantity).await?;
        Ok(())
    }

    /// The full ledger of one channel.
    pub async fn sales(&self, channel: SalesChannel) -> DbResult<Vec<SaleRecord>> {
        self.db()?.sales(channel).list().await
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// The consolidated per-product report.
    pub async fn get_report(&self) -> DbResult<Vec<ReportRow>> {
        self.db()?.reports().build().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
