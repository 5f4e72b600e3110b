//! # Command Dispatch
//!
//! One function call per subcommand, then rendering to stdout.
//!
//! ```text
//! Command::SellStore { id, quantity }
//!      │
//!      ▼
//! service.sell_in_store(id, quantity) ──► Err ──► CliError (unchanged message)
//!      │
//!      ▼
//! "Recorded store sale: product 1 × 3"   or   {"product_id":1,...} with --json
//! ```

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::cli::Command;
use crate::error::{CliError, ErrorCode};
use shopledger_core::{InventoryItem, Money, Product, ProductId, ReportRow, SalesChannel};
use shopledger_db::StoreService;

/// Acknowledgement for mutating commands in JSON mode.
#[derive(Debug, Serialize)]
struct Ack<'a> {
    action: &'a str,
    product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<SalesChannel>,
}

/// Runs one command against a started service.
pub async fn run<W: Write>(
    service: &StoreService,
    command: Command,
    json: bool,
    out: &mut W,
) -> Result<(), CliError> {
    debug!(?command, "Dispatching command");

    match command {
        Command::AddProduct { name, price } => {
            let id = service.add_product(&name, price).await?;
            if json {
                write_json(out, &ack("add_product", id, None, None))?;
            } else {
                writeln!(out, "Added product {}: {} at {}", id, name.trim(), price)?;
            }
        }

        Command::Replenish { id, quantity } => {
            service.replenish_stock(id, quantity).await?;
            if json {
                write_json(out, &ack("replenish", id, Some(quantity), None))?;
            } else {
                writeln!(out, "Replenished product {} by {}", id, quantity)?;
            }
        }

        Command::Deactivate { id } => {
            service.deactivate_product(id).await?;
            if json {
                write_json(out, &ack("deactivate", id, None, None))?;
            } else {
                writeln!(out, "Product {} deactivated", id)?;
            }
        }

        Command::Activate { id } => {
            service.activate_product(id).await?;
            if json {
                write_json(out, &ack("activate", id, None, None))?;
            } else {
                writeln!(out, "Product {} activated", id)?;
            }
        }

        Command::SellStore { id, quantity } => {
            service.sell_in_store(id, quantity).await?;
            write_sale(out, json, SalesChannel::Store, id, quantity)?;
        }

        Command::SellOnline { id, quantity } => {
            service.sell_online(id, quantity).await?;
            write_sale(out, json, SalesChannel::Online, id, quantity)?;
        }

        Command::Inventory => {
            let items = service.get_inventory().await?;
            if json {
                write_json(out, &items)?;
            } else {
                render_inventory(out, &items)?;
            }
        }

        Command::Report => {
            let rows = service.get_report().await?;
            if json {
                write_json(out, &rows)?;
            } else {
                render_report(out, &rows)?;
            }
        }

        Command::Find { id } => match service.find_product_by_id(id).await? {
            Some(item) if json => write_json(out, &item)?,
            Some(item) => render_inventory(out, std::slice::from_ref(&item))?,
            None => {
                return Err(CliError::new(
                    ErrorCode::NotFound,
                    format!("Product not found: {}", id),
                ))
            }
        },

        Command::Products => {
            let products = service.list_products().await?;
            if json {
                write_json(out, &products)?;
            } else {
                render_products(out, &products)?;
            }
        }
    }

    Ok(())
}

fn ack(
    action: &str,
    product_id: ProductId,
    quantity: Option<i64>,
    channel: Option<SalesChannel>,
) -> Ack<'_> {
    Ack {
        action,
        product_id,
        quantity,
        channel,
    }
}

fn write_sale<W: Write>(
    out: &mut W,
    json: bool,
    channel: SalesChannel,
    id: ProductId,
    quantity: i64,
) -> Result<(), CliError> {
    if json {
        write_json(out, &ack("sell", id, Some(quantity), Some(channel)))
    } else {
        writeln!(out, "Recorded {} sale: product {} × {}", channel, id, quantity)?;
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Text Rendering
// =============================================================================

/// Fixed-width inventory table.
pub fn render_inventory<W: Write>(out: &mut W, items: &[InventoryItem]) -> std::io::Result<()> {
    writeln!(out, "{:>5}  {:<30} {:>10} {:>8}", "ID", "NAME", "PRICE", "STOCK")?;
    for item in items {
        writeln!(
            out,
            "{:>5}  {:<30} {:>10} {:>8}",
            item.product_id.get(),
            item.name,
            item.price.to_string(),
            item.quantity
        )?;
    }
    Ok(())
}

/// Fixed-width report table with one column per sales channel, revenue at
/// the current price, and a status column. A closing line totals revenue.
pub fn render_report<W: Write>(out: &mut W, rows: &[ReportRow]) -> std::io::Result<()> {
    write!(out, "{:>5}  {:<30} {:>10} {:>8}", "ID", "NAME", "PRICE", "STOCK")?;
    for channel in SalesChannel::ALL {
        write!(out, " {:>7}", channel.as_str().to_uppercase())?;
    }
    writeln!(out, " {:>7} {:>14}  {}", "TOTAL", "REVENUE", "STATUS")?;

    let mut total = Some(Money::zero());
    for row in rows {
        write!(
            out,
            "{:>5}  {:<30} {:>10} {:>8}",
            row.product_id.get(),
            row.name,
            row.price.to_string(),
            row.stock
        )?;
        for channel in SalesChannel::ALL {
            write!(out, " {:>7}", row.sold_via(channel))?;
        }
        let revenue = row.revenue();
        total = total.zip(revenue).and_then(|(sum, r)| sum.checked_add(r));
        writeln!(
            out,
            " {:>7} {:>14}  {}",
            row.total_sold,
            money_cell(revenue),
            row.status_label()
        )?;
    }

    writeln!(out, "{:>5}  {:<30} {:>74}", "", "TOTAL REVENUE", money_cell(total))?;
    Ok(())
}

fn money_cell(amount: Option<Money>) -> String {
    match amount {
        Some(amount) => amount.to_string(),
        None => "overflow".to_string(),
    }
}

fn render_products<W: Write>(out: &mut W, products: &[Product]) -> std::io::Result<()> {
    writeln!(out, "{:>5}  {:<30} {:>10}  {}", "ID", "NAME", "PRICE", "STATUS")?;
    for product in products {
        let status = if product.is_active { "active" } else { "inactive" };
        writeln!(
            out,
            "{:>5}  {:<30} {:>10}  {}",
            product.id.get(),
            product.name,
            product.price.to_string(),
            status
        )?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
