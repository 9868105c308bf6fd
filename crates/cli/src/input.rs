//! Loading hydrated orders and stock snapshots from disk.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as
//! JSON. Both use the admin API's camelCase field names:
//!
//! ```yaml
//! # orders.yaml
//! - id: "1"
//!   code: AAA
//!   lines:
//!     - id: "10"
//!       productVariant: { sku: MUG-RED }
//!       quantity: 2
//!   customFields: { carrierCode: ups }
//!
//! # stock.yaml
//! MUG-RED: { stockOnHand: 12, stockAllocated: 3 }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use fulfillment_desk_core::{Order, StockLevelMap};

use crate::error::CliError;

/// Load the orders to check, in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_orders(path: &Path) -> Result<Vec<Order>, CliError> {
    let orders: Vec<Order> = load(path).await?;
    debug!(count = orders.len(), "Loaded orders");
    Ok(orders)
}

/// Load a stock snapshot keyed by SKU.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_stock(path: &Path) -> Result<StockLevelMap, CliError> {
    let stock: StockLevelMap = load(path).await?;
    debug!(skus = stock.len(), "Loaded stock levels");
    Ok(stock)
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_owned(),
            source,
        })?;
    parse(path, &content)
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CliError> {
    if is_yaml(path) {
        serde_yaml::from_str(content).map_err(|source| CliError::Yaml {
            path: path.to_owned(),
            source,
        })
    } else {
        serde_json::from_str(content).map_err(|source| CliError::Json {
            path: path.to_owned(),
            source,
        })
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
