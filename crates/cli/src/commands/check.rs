//! Order check and pick list commands.
//!
//! # Usage
//!
//! ```bash
//! # Check a batch of orders against a stock snapshot
//! fd-cli check --orders orders.json --stock stock.yaml
//!
//! # Sort oldest-placed-first and emit JSON, failing if any order is blocked
//! fd-cli check -o orders.json -s stock.json --sort-by-placed --format json --fail-on-blocked
//!
//! # Only print the pick list
//! fd-cli pick-list -o orders.json -s stock.json
//! ```

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use fulfillment_desk_core::{Order, OrderCheckResult, check_orders, sort_by_priority};

use crate::config::OutputFormat;
use crate::error::CliError;
use crate::input::{load_orders, load_stock};
use crate::render::{render_pick_list, render_result};

/// Where to read the orders and stock from, and whether to reorder them.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub orders: &'a Path,
    pub stock: &'a Path,
    /// Sort oldest-placed-first instead of keeping file order.
    pub sort_by_placed: bool,
}

/// Summary of a check run, used for the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Orders that must be excluded from fulfillment.
    pub blocked: usize,
    /// Orders that can go ahead.
    pub fulfillable: usize,
}

/// Check orders and write the report to `out`.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the report cannot
/// be written.
pub async fn check(
    input: CheckInput<'_>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<CheckOutcome, CliError> {
    let (orders, result) = run(input).await?;

    let fulfillable = result.fulfillable_orders(&orders).len();
    let blocked = orders.len() - fulfillable;

    if blocked > 0 {
        warn!(blocked, "Some orders cannot be fulfilled");
    }
    info!(
        orders = result.order_count,
        fulfillable,
        pick_list = result.pick_list.len(),
        "Order check complete"
    );

    out.write_all(render_result(&result, format)?.as_bytes())?;
    Ok(CheckOutcome {
        blocked,
        fulfillable,
    })
}

/// Check orders and write only the pick list to `out`.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the table cannot
/// be written.
pub async fn pick_list(input: CheckInput<'_>, out: &mut impl Write) -> Result<(), CliError> {
    let (_, result) = run(input).await?;
    out.write_all(render_pick_list(&result.pick_list)?.as_bytes())?;
    Ok(())
}

async fn run(input: CheckInput<'_>) -> Result<(Vec<Order>, OrderCheckResult), CliError> {
    let (mut orders, stock) =
        tokio::try_join!(load_orders(input.orders), load_stock(input.stock))?;

    if input.sort_by_placed {
        sort_by_priority(&mut orders);
    }

    let result = check_orders(&orders, &stock);
    Ok((orders, result))
}
