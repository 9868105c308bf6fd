//! Rendering check results for the terminal.

use std::fmt::Write;

use fulfillment_desk_core::{OrderCheckError, OrderCheckResult, PickListEntry};

use crate::config::OutputFormat;
use crate::error::CliError;

/// Render a full check result in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_result(result: &OrderCheckResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => text_report(result).map_err(|e| CliError::Render(e.to_string())),
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map(|json| json + "\n")
            .map_err(|e| CliError::Render(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| CliError::Render(e.to_string()))
        }
    }
}

/// Render only the pick list as a text table.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn render_pick_list(pick_list: &[PickListEntry]) -> Result<String, CliError> {
    let mut out = String::new();
    pick_list_table(&mut out, pick_list).map_err(|e| CliError::Render(e.to_string()))?;
    Ok(out)
}

fn text_report(result: &OrderCheckResult) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "{} orders checked, {} with errors, {} with insufficient stock",
        result.order_count,
        result.errors.len(),
        result.insufficient_stock
    )?;

    if !result.errors.is_empty() {
        writeln!(out)?;
        for error in &result.errors {
            write_error(&mut out, error)?;
        }
    }

    writeln!(out)?;
    pick_list_table(&mut out, &result.pick_list)?;
    Ok(out)
}

fn write_error(out: &mut String, error: &OrderCheckError) -> std::fmt::Result {
    writeln!(out, "{}  {}", error.order_code(), error.kind())?;
    for shortfall in error.shortfalls() {
        writeln!(
            out,
            "    {}: requested {}, available {}",
            shortfall.sku, shortfall.requested, shortfall.available
        )?;
    }
    Ok(())
}

fn pick_list_table(out: &mut String, pick_list: &[PickListEntry]) -> std::fmt::Result {
    if pick_list.is_empty() {
        return writeln!(out, "Pick list is empty");
    }

    let sku_width = pick_list
        .iter()
        .map(|entry| entry.sku.len())
        .chain(std::iter::once("SKU".len()))
        .max()
        .unwrap_or_default();

    writeln!(
        out,
        "{:<sku_width$}  {:>8}  {:>8}  {:>8}  {:>9}",
        "SKU", "NEEDED", "USED", "ON HAND", "ALLOCATED"
    )?;
    for entry in pick_list {
        writeln!(
            out,
            "{:<sku_width$}  {:>8}  {:>8}  {:>8}  {:>9}",
            entry.sku, entry.quantity_needed, entry.quantity_used, entry.on_hand, entry.total_allocated
        )?;
    }
    Ok(())
}
