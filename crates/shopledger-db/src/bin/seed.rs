//! # Seed Data Generator
//!
//! Populates an empty database with a demo catalog and stock for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./shopledger_dev.db
//! cargo run -p shopledger-db --bin seed
//!
//! # Specify database path
//! cargo run -p shopledger-db --bin seed -- --db ./data/shop.db
//!
//! # Also record a few sales in both channels
//! cargo run -p shopledger-db --bin seed -- --with-sales
//! ```
//!
//! Products with a non-zero initial stock are replenished; the rest keep no
//! stock record and list with quantity 0. Every fifth product is deactivated
//! so reports show both statuses.

use std::env;

use shopledger_core::{Money, SalesChannel};
use shopledger_db::{Database, DbConfig};

/// Demo catalog: (name, price in cents, initial stock)
const CATALOG: &[(&str, i64, i64)] = &[
    ("Widget", 999, 10),
    ("Gadget", 1450, 25),
    ("Sprocket", 275, 120),
    ("Flange", 1899, 8),
    ("Grommet", 45, 500),
    ("Doohickey", 650, 40),
    ("Gizmo", 3200, 5),
    ("Thingamajig", 125, 0),
    ("Whatsit", 899, 60),
    ("Contraption", 7499, 2),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./shopledger_dev.db");
    let mut with_sales = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--with-sales" | "-s" => with_sales = true,
            "--help" | "-h" => {
                println!("ShopLedger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./shopledger_dev.db)");
                println!("  -s, --with-sales   Record demo sales in both channels");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("ShopLedger Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let result = seed(&db, with_sales).await;
    db.close().await;
    result?;

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

async fn seed(db: &Database, with_sales: bool) -> Result<(), Box<dyn std::error::Error>> {
    let products = db.products();
    let inventory = db.inventory();

    for (idx, (name, price_cents, stock)) in CATALOG.iter().enumerate() {
        let id = products.create(name, Money::from_cents(*price_cents)).await?;

        if *stock > 0 {
            inventory.replenish(id, *stock).await?;
        }

        if with_sales {
            let qty = (idx as i64 % 3) + 1;
            db.sales(SalesChannel::Store).record_sale(id, qty).await?;
            db.sales(SalesChannel::Online).record_sale(id, qty + 1).await?;
        }

        // Deactivate after selling so the ledger still references it
        if (idx + 1) % 5 == 0 {
            products.deactivate(id).await?;
        }

        println!("  {:>3}  {:<12} {:>9}  stock {}", id, name, Money::from_cents(*price_cents), stock);
    }

    println!();
    println!("✓ Generated {} products", CATALOG.len());
    Ok(())
}
