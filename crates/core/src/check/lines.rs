//! Resolving the order lines a check has to evaluate.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Fulfillment, FulfillmentId, Order, OrderLine, OrderLineId};

/// A fulfillment points at an order line that is not in the checked orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fulfillment {fulfillment_id} references order line {order_line_id}, which is not in the selected orders")]
pub struct MissingLineRef {
    pub fulfillment_id: FulfillmentId,
    pub order_line_id: OrderLineId,
}

/// A SKU and the quantity of it one line needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedLine<'a> {
    pub sku: &'a str,
    pub quantity: u32,
}

impl<'a> From<&'a OrderLine> for ResolvedLine<'a> {
    fn from(line: &'a OrderLine) -> Self {
        Self {
            sku: &line.product_variant.sku,
            quantity: line.quantity,
        }
    }
}

/// Every order line across the checked orders, by ID.
pub(crate) struct LineIndex<'a> {
    lines: HashMap<&'a OrderLineId, &'a OrderLine>,
}

impl<'a> LineIndex<'a> {
    pub fn build(orders: &'a [Order]) -> Self {
        let lines = orders
            .iter()
            .flat_map(|order| &order.lines)
            .map(|line| (&line.id, line))
            .collect();
        Self { lines }
    }

    /// Resolve a fulfillment's lines to SKUs, using the fulfillment's quantities.
    ///
    /// # Errors
    ///
    /// Returns [`MissingLineRef`] for the first line whose order line is unknown.
    pub fn resolve(&self, fulfillment: &Fulfillment) -> Result<Vec<ResolvedLine<'a>>, MissingLineRef> {
        fulfillment
            .lines
            .iter()
            .map(|fl| {
                self.lines
                    .get(&fl.order_line_id)
                    .copied()
                    .map(|line| ResolvedLine {
                        sku: &line.product_variant.sku,
                        quantity: fl.quantity,
                    })
                    .ok_or_else(|| MissingLineRef {
                        fulfillment_id: fulfillment.id.clone(),
                        order_line_id: fl.order_line_id.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn orders() -> Vec<Order> {
        serde_json::from_value(json!([
            {
                "id": "1", "code": "A",
                "lines": [
                    { "id": "L1", "productVariant": { "sku": "X" }, "quantity": 4 },
                    { "id": "L2", "productVariant": { "sku": "Y" }, "quantity": 1 },
                ],
            },
            {
                "id": "2", "code": "B",
                "lines": [{ "id": "L3", "productVariant": { "sku": "Z" }, "quantity": 2 }],
            },
        ]))
        .unwrap()
    }

    fn fulfillment(lines: serde_json::Value) -> Fulfillment {
        serde_json::from_value(json!({ "id": "F1", "state": "Created", "lines": lines })).unwrap()
    }

    #[test]
    fn test_resolve_across_orders_uses_fulfillment_quantity() {
        let orders = orders();
        let index = LineIndex::build(&orders);
        let resolved = index
            .resolve(&fulfillment(json!([
                { "orderLineId": "L1", "quantity": 2 },
                { "orderLineId": "L3", "quantity": 2 },
            ])))
            .unwrap();
        assert_eq!(
            resolved,
            [
                ResolvedLine { sku: "X", quantity: 2 },
                ResolvedLine { sku: "Z", quantity: 2 },
            ]
        );
    }

    #[test]
    fn test_resolve_missing_line() {
        let orders = orders();
        let index = LineIndex::build(&orders);
        let err = index
            .resolve(&fulfillment(json!([
                { "orderLineId": "L1", "quantity": 1 },
                { "orderLineId": "L9", "quantity": 1 },
            ])))
            .unwrap_err();
        assert_eq!(err.order_line_id.as_str(), "L9");
        assert_eq!(err.fulfillment_id.as_str(), "F1");
    }
}
