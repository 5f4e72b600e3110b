//! Clap-derived argument types for the `shopledger` binary.
//!
//! Dispatch lives in `commands`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shopledger_core::validation::validate_product_id;
use shopledger_core::{Money, ProductId};

#[derive(Parser, Debug)]
#[clap(
    name = "shopledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Retail catalog, stock levels and two-channel sales ledger"
)]
pub struct Cli {
    /// SQLite database file (overrides SHOPLEDGER_DB_PATH).
    #[clap(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print results and errors as JSON.
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a product to the catalog
    #[clap(allow_negative_numbers = true)]
    AddProduct {
        /// Display name
        name: String,
        /// Unit price, e.g. 9.99
        price: Money,
    },
    /// Add units to a product's stock
    #[clap(allow_negative_numbers = true)]
    Replenish {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
        quantity: i64,
    },
    /// Stop a product from being sold
    Deactivate {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
    },
    /// Allow a deactivated product to be sold again
    Activate {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
    },
    /// Record a sale at the store counter
    #[clap(allow_negative_numbers = true)]
    SellStore {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
        quantity: i64,
    },
    /// Record a sale through the online shop
    #[clap(allow_negative_numbers = true)]
    SellOnline {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
        quantity: i64,
    },
    /// List every product with its stock
    Inventory,
    /// Consolidated stock and sales report
    Report,
    /// Look up one product in the inventory listing
    Find {
        #[clap(value_parser = parse_product_id)]
        id: ProductId,
    },
    /// List the catalog, including inactive products
    Products,
}

fn parse_product_id(raw: &str) -> Result<ProductId, String> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an integer product id", raw))?;
    validate_product_id(id).map_err(|e| e.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
