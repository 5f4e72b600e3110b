//! # Database Connection Management
//!
//! Connection pool creation, write serialization and commit handling for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection                                │
//! │                                                                         │
//! │  StoreService::start()                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config) ← Create pool + run migrations                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │   SqlitePool          write_lock        │                            │
//! │  │   (reads go here)     Arc<Mutex<()>>    │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │  Mutations: begin_write() → WriteTxn                            │
//! │       ▼                                                                 │
//! │  lock ──► BEGIN ──► statements ──► commit()   (TransactionFailed)       │
//! │                         │                                               │
//! │                         └─► drop without commit = ROLLBACK              │
//! │                                                                         │
//! │  One writer at a time; a failed validation leaves nothing behind.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::inventory::InventoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SalesLedger;
use shopledger_core::SalesChannel;

/// Path value that selects an in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/shopledger.db")
///     .max_connections(5)
///     .create_if_missing(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections open.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,

    /// Whether a missing database file is created.
    /// Default: true
    pub create_if_missing: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
            create_if_missing: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether a missing database file is created on open.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Creates an isolated in-memory database configuration (for testing).
    ///
    /// A single connection that never idles out: the data lives exactly as
    /// long as the pool.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
            create_if_missing: true,
        }
    }

    /// True when this config selects an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// The single shared session handle.
///
/// Cloning is cheap; all clones share the pool and the write lock. The
/// handle is passed explicitly to every repository, there is no global.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Serializes mutating operations across all clones.
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    /// Opens the database.
    ///
    /// ## What This Does
    /// 1. Creates the database file if allowed and missing
    /// 2. Configures SQLite: WAL mode (file databases), NORMAL synchronous,
    ///    foreign keys enabled
    /// 3. Creates the pool and establishes the first connection eagerly
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError::ConnectionFailed | MigrationFailed)` - store unreachable or misconfigured
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database"
        );

        let connect_options = if config.is_in_memory() {
            // Each parse yields a uniquely named shared-cache database
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(config.create_if_missing)
                .journal_mode(SqliteJournalMode::Wal)
        }
        .synchronous(SqliteSynchronous::Normal)
        // SQLite has foreign keys disabled by default
        .foreign_keys(true);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        };

        if config.run_migrations {
            if let Err(e) = db.run_migrations().await {
                db.close().await;
                return Err(e);
            }
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Starts a serialized write.
    ///
    /// Waits for any other writer on this handle (or its clones), then
    /// opens a transaction. Dropping the returned [`WriteTxn`] without
    /// calling [`WriteTxn::commit`] rolls the transaction back.
    pub async fn begin_write(&self) -> DbResult<WriteTxn<'_>> {
        let guard = self.write_lock.lock().await;
        let tx = self.pool.begin().await?;
        Ok(WriteTxn { tx, _guard: guard })
    }

    /// Returns a reference to the connection pool, for reads.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the catalog repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the inventory repository.
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.clone())
    }

    /// Returns the ledger for one sales channel.
    pub fn sales(&self, channel: SalesChannel) -> SalesLedger {
        SalesLedger::new(self.clone(), channel)
    }

    /// Returns the reporting repository.
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.clone())
    }

    /// Closes the connection pool.
    ///
    /// Idempotent. After calling close, every operation fails with a
    /// connection error.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            debug!("Database already closed");
            return;
        }
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// True once [`Database::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Write Transaction
// =============================================================================

/// An open write transaction holding the write lock.
pub struct WriteTxn<'a> {
    // Field order matters: the transaction is dropped (rolled back) before
    // the lock is released.
    tx: Transaction<'static, Sqlite>,
    _guard: MutexGuard<'a, ()>,
}

impl WriteTxn<'_> {
    /// Connection to issue statements on inside the transaction.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Durably applies the pending writes.
    ///
    /// Backend rejection surfaces as `DbError::TransactionFailed`.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
