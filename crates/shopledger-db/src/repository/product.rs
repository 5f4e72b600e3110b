//! # Product Repository (Catalog)
//!
//! Creates products and flips their active/inactive lifecycle flag.
//!
//! ## Product Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Lifecycle                                  │
//! │                                                                         │
//! │  create("Widget", $9.99)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────┐   deactivate(id)   ┌────────────┐                         │
//! │  │  ACTIVE  │ ─────────────────► │  INACTIVE  │                         │
//! │  │ sellable │ ◄───────────────── │ report only│                         │
//! │  └──────────┘    activate(id)    └────────────┘                         │
//! │                                                                         │
//! │  Rows are never deleted. Both flips are idempotent and fail with        │
//! │  NotFound when the product does not exist.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Executor, Sqlite};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use shopledger_core::validation::{validate_price, validate_product_name};
use shopledger_core::{Money, Product, ProductId};

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(db.clone());
///
/// let id = repo.create("Widget", "9.99".parse()?).await?;
/// assert!(repo.is_active(id).await?);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    /// Inserts a new active product and returns its assigned ID.
    ///
    /// ## Returns
    /// * `Ok(ProductId)` - Newly assigned, never reused
    /// * `Err(DbError::Validation)` - Empty/too long name or negative price
    pub async fn create(&self, name: &str, price: Money) -> DbResult<ProductId> {
        let name = validate_product_name(name)?;
        validate_price(price)?;

        debug!(name = %name, price = %price, "Creating product");

        let mut txn = self.db.begin_write().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price_cents, is_active, created_at)
            VALUES (?1, ?2, 1, ?3)
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(Utc::now())
        .execute(txn.conn())
        .await?;

        let id = ProductId::new(result.last_insert_rowid());
        txn.commit().await?;

        info!(product_id = %id, "Product created");
        Ok(id)
    }

    /// True when a product with this ID was ever created.
    pub async fn exists(&self, id: ProductId) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(found.is_some())
    }

    /// True only for an existing, active product.
    ///
    /// Absent and deactivated products both read as `false`. Use
    /// [`ProductRepository::exists`] to tell them apart.
    pub async fn is_active(&self, id: ProductId) -> DbResult<bool> {
        Ok(fetch_active_flag(self.db.pool(), id).await?.unwrap_or(false))
    }

    /// Marks a product as not sellable. Idempotent.
    pub async fn deactivate(&self, id: ProductId) -> DbResult<()> {
        self.set_active(id, false).await
    }

    /// Makes a product sellable again. Idempotent.
    pub async fn activate(&self, id: ProductId) -> DbResult<()> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: ProductId, active: bool) -> DbResult<()> {
        debug!(product_id = %id, active, "Setting product active flag");

        let mut txn = self.db.begin_write().await?;

        // SQLite counts matched rows, so re-applying the same flag still reports 1
        let result = sqlx::query("UPDATE products SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(txn.conn())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        txn.commit().await?;

        info!(product_id = %id, active, "Product flag updated");
        Ok(())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found (active or not)
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                name,
                price_cents AS price,
                is_active,
                created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(product)
    }

    /// Lists every product, active or not, by ascending ID.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                name,
                price_cents AS price,
                is_active,
                created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(products)
    }

    /// Counts every product ever created.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.db.pool())
            .await?;

        Ok(count)
    }
}

/// Reads a product's active flag, `None` when the product does not exist.
///
/// Generic over the executor so sale and replenish paths can read inside
/// their own write transaction.
pub(crate) async fn fetch_active_flag<'e, E>(executor: E, id: ProductId) -> DbResult<Option<bool>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let flag = sqlx::query_scalar::<_, bool>("SELECT is_active FROM products WHERE id = ?1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(flag)
}

// =============================================================================
// Unit Tests
// =============================================================================
