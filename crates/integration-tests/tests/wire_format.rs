//! Integration tests for orders and stock as the admin API serializes them.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use fulfillment_desk_core::{
    FulfillmentState, Order, OrderCheckErrorKind, OrderCheckResult, StockLevelMap, check_orders,
};

const ORDERS_YAML: &str = r"
- id: 101
  code: W7K2XQ
  state: PaymentSettled
  orderPlacedAt: 2025-06-01T08:30:00Z
  lines:
    - id: 9001
      productVariant: { sku: TEE-BLK-M }
      quantity: 2
  fulfillments:
    - id: 55
      state: Shipped
      lines: [{ orderLineId: 9001, quantity: 1 }]
    - id: 56
      state: AwaitingCarrier
      lines: [{ orderLineId: 9001, quantity: 1 }]
  customFields:
    carrierCode: usps
    serviceCode: Priority
- id: 102
  code: PL3M0A
  state: PaymentSettled
  lines:
    - id: 9002
      productVariant: { sku: TEE-BLK-M }
      quantity: 1
";

const STOCK_YAML: &str = r"
TEE-BLK-M: { stockOnHand: 2, stockAllocated: 0 }
";

#[test]
fn test_yaml_orders_with_numeric_ids() {
    let orders: Vec<Order> = serde_yaml::from_str(ORDERS_YAML).unwrap();
    let stock: StockLevelMap = serde_yaml::from_str(STOCK_YAML).unwrap();

    let first = orders.first().unwrap();
    assert_eq!(first.id.as_str(), "101");
    assert!(first.order_placed_at.is_some());

    let states: Vec<_> = first.fulfillments.iter().flatten().map(|f| f.state).collect();
    assert_eq!(states, [FulfillmentState::Shipped, FulfillmentState::Other]);
    assert!(first.current_fulfillment().is_none());

    let result = check_orders(&orders, &stock);

    // 101 has no active fulfillment, so its own lines (2 units) are checked.
    // 102 then finds nothing left and has no shipping method either.
    let errors: Vec<_> = result.errors.iter().map(|e| (e.order_code(), e.kind())).collect();
    assert_eq!(errors, [("PL3M0A", OrderCheckErrorKind::InsufficientStock)]);
}

#[test]
fn test_result_json_shape() {
    let orders: Vec<Order> = serde_json::from_value(json!([
        {
            "id": "1",
            "code": "AAA",
            "lines": [{ "id": "L1", "productVariant": { "sku": "X" }, "quantity": 1 }],
        },
    ]))
    .unwrap();
    let stock: StockLevelMap =
        serde_json::from_value(json!({ "X": { "stockOnHand": 3, "stockAllocated": 1 } })).unwrap();

    let result = check_orders(&orders, &stock);

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "errors": [{ "type": "no-shipping-method", "orderId": "1", "orderCode": "AAA" }],
            "orderCount": 1,
            "insufficientStock": 0,
            "pickList": [{
                "sku": "X",
                "quantityNeeded": 1,
                "quantityUsed": 1,
                "onHand": 3,
                "totalAllocated": 1,
            }],
        })
    );

    let round_trip: OrderCheckResult =
        serde_json::from_value(serde_json::to_value(&result).unwrap()).unwrap();
    assert_eq!(round_trip, result);
}
