//! Integration tests for Fulfillment Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fulfillment-desk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_check` - Fulfillability and pick-list behaviour of `check_orders`
//! - `wire_format` - Orders and stock as the admin API serializes them
//!
//! Fixtures are built as camelCase JSON and deserialized, so every test also
//! exercises the wire format.

use serde_json::{Value, json};

use fulfillment_desk_core::{Order, StockLevel, StockLevelMap};

/// Builder for an order fixture.
#[derive(Debug, Clone)]
pub struct OrderFixture {
    value: Value,
}

impl OrderFixture {
    /// An order with no lines, no fulfillments, and no shipping method.
    #[must_use]
    pub fn new(id: &str, code: &str) -> Self {
        Self {
            value: json!({
                "id": id,
                "code": code,
                "state": "PaymentSettled",
                "lines": [],
                "fulfillments": [],
            }),
        }
    }

    /// Add an order line.
    #[must_use]
    pub fn line(mut self, id: &str, sku: &str, quantity: u32) -> Self {
        push(
            &mut self.value["lines"],
            json!({ "id": id, "productVariant": { "sku": sku }, "quantity": quantity }),
        );
        self
    }

    /// Add a fulfillment covering `(order_line_id, quantity)` pairs.
    #[must_use]
    pub fn fulfillment(mut self, id: &str, state: &str, lines: &[(&str, u32)]) -> Self {
        let lines: Vec<Value> = lines
            .iter()
            .map(|(line_id, quantity)| json!({ "orderLineId": line_id, "quantity": quantity }))
            .collect();
        push(
            &mut self.value["fulfillments"],
            json!({ "id": id, "state": state, "lines": lines }),
        );
        self
    }

    /// Select a carrier for the order.
    #[must_use]
    pub fn carrier(mut self, carrier_code: &str) -> Self {
        self.value["customFields"] = json!({ "carrierCode": carrier_code });
        self
    }

    /// Deserialize into an [`Order`].
    ///
    /// # Panics
    ///
    /// Panics if the fixture is not a valid order.
    #[must_use]
    pub fn build(self) -> Order {
        serde_json::from_value(self.value).expect("fixture should be a valid order")
    }
}

fn push(array: &mut Value, item: Value) {
    if let Value::Array(items) = array {
        items.push(item);
    }
}

/// Build a stock snapshot from `(sku, stock_on_hand, stock_allocated)` triples.
#[must_use]
pub fn stock(levels: &[(&str, i64, i64)]) -> StockLevelMap {
    levels
        .iter()
        .map(|&(sku, stock_on_hand, stock_allocated)| {
            (
                sku.to_owned(),
                StockLevel {
                    stock_on_hand,
                    stock_allocated,
                },
            )
        })
        .collect()
}
