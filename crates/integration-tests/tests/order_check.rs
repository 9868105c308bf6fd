//! Integration tests for order fulfillability checks and pick lists.

use fulfillment_desk_core::{
    Order, OrderCheckError, OrderCheckErrorKind, OrderId, PickListEntry, StockShortfall,
    check_orders,
};
use fulfillment_desk_integration_tests::{OrderFixture, stock};

fn kinds(errors: &[OrderCheckError]) -> Vec<(&str, OrderCheckErrorKind)> {
    errors.iter().map(|e| (e.order_code(), e.kind())).collect()
}

fn pick(sku: &str, needed: i64, used: i64, on_hand: i64, allocated: i64) -> PickListEntry {
    PickListEntry {
        sku: sku.to_owned(),
        quantity_needed: needed,
        quantity_used: used,
        on_hand,
        total_allocated: allocated,
    }
}

// =============================================================================
// Merged Fulfillments
// =============================================================================

fn merged_pair(state: &str) -> Vec<Order> {
    let lines = [("LA", 2), ("LB", 3)];
    vec![
        OrderFixture::new("1", "AAA")
            .line("LA", "X", 2)
            .fulfillment("F1", state, &lines)
            .build(),
        OrderFixture::new("2", "BBB")
            .line("LB", "X", 3)
            .fulfillment("F1", state, &lines)
            .build(),
    ]
}

#[test]
fn test_merged_active_fulfillment_counted_once() {
    let result = check_orders(&merged_pair("Created"), &stock(&[("X", 5, 0)]));

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.pick_list, [pick("X", 5, 5, 5, 0)]);
}

#[test]
fn test_merged_pending_fulfillment_counted_once() {
    let result = check_orders(&merged_pair("Pending"), &stock(&[("X", 0, 5)]));

    assert!(result.errors.is_empty());
    assert_eq!(result.pick_list, [pick("X", 0, 5, 0, 5)]);
}

#[test]
fn test_merged_fulfillment_with_sibling_missing() {
    let selected: Vec<Order> = merged_pair("Created").into_iter().take(1).collect();

    let result = check_orders(&selected, &stock(&[("X", 5, 0)]));

    assert_eq!(
        result.errors,
        [OrderCheckError::NotAllOrdersSelected {
            order_id: OrderId::new("1"),
            order_code: "AAA".into(),
        }]
    );
    assert_eq!(result.order_count, 1);
    assert!(result.pick_list.is_empty());
}

// =============================================================================
// Priority
// =============================================================================

#[test]
fn test_input_order_decides_who_gets_scarce_stock() {
    let a = OrderFixture::new("1", "AAA").line("L1", "X", 3).carrier("ups").build();
    let b = OrderFixture::new("2", "BBB").line("L2", "X", 3).carrier("ups").build();
    let levels = stock(&[("X", 5, 0)]);

    let result = check_orders(&[a.clone(), b.clone()], &levels);
    assert_eq!(
        result.errors,
        [OrderCheckError::InsufficientStock {
            order_id: OrderId::new("2"),
            order_code: "BBB".into(),
            lines: vec![StockShortfall {
                sku: "X".into(),
                requested: 3,
                available: 2,
            }],
        }]
    );
    assert_eq!(result.insufficient_stock, 1);

    let reversed = check_orders(&[b, a], &levels);
    assert_eq!(kinds(&reversed.errors), [("AAA", OrderCheckErrorKind::InsufficientStock)]);
}

// =============================================================================
// Pre-allocated Fulfillments
// =============================================================================

#[test]
fn test_pending_fulfillment_bypasses_stock_check() {
    let order = OrderFixture::new("1", "AAA")
        .line("L1", "X", 10)
        .fulfillment("F1", "Pending", &[("L1", 10)])
        .build();

    let result = check_orders(&[order], &stock(&[("X", 0, 10)]));

    assert!(result.errors.is_empty());
    assert_eq!(result.insufficient_stock, 0);
    assert_eq!(result.order_count, 1);
    assert_eq!(result.pick_list, [pick("X", 0, 10, 0, 10)]);
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn test_missing_line_does_not_stop_later_orders() {
    let broken = OrderFixture::new("1", "AAA")
        .line("L1", "X", 1)
        .fulfillment("F1", "Created", &[("GHOST", 1)])
        .build();
    let fine = OrderFixture::new("2", "BBB").line("L2", "Y", 2).carrier("ups").build();

    let result = check_orders(&[broken, fine], &stock(&[("X", 5, 0), ("Y", 5, 0)]));

    assert_eq!(kinds(&result.errors), [("AAA", OrderCheckErrorKind::NotAllOrdersSelected)]);
    assert_eq!(result.pick_list, [pick("Y", 2, 2, 5, 0)]);
}

#[test]
fn test_stock_error_suppresses_shipping_method_error() {
    let order = OrderFixture::new("1", "AAA").line("L1", "X", 3).build();

    let result = check_orders(&[order], &stock(&[("X", 1, 0)]));

    assert_eq!(kinds(&result.errors), [("AAA", OrderCheckErrorKind::InsufficientStock)]);
    assert_eq!(result.insufficient_stock, 1);
}

#[test]
fn test_shipping_method_not_needed_with_active_fulfillment() {
    let order = OrderFixture::new("1", "AAA")
        .line("L1", "X", 1)
        .fulfillment("F1", "OnHold", &[("L1", 1)])
        .build();

    let result = check_orders(&[order], &stock(&[("X", 1, 0)]));

    assert!(result.errors.is_empty());
}

#[test]
fn test_every_order_accounted_for() {
    let orders = vec![
        OrderFixture::new("1", "OK").line("L1", "X", 1).carrier("ups").build(),
        OrderFixture::new("2", "SHORT").line("L2", "X", 9).carrier("ups").build(),
        OrderFixture::new("3", "NOSHIP").line("L3", "Y", 1).build(),
        OrderFixture::new("4", "SPLIT")
            .line("L4", "Y", 1)
            .fulfillment("F4", "Created", &[("ELSEWHERE", 1)])
            .build(),
    ];

    let result = check_orders(&orders, &stock(&[("X", 2, 0), ("Y", 2, 0)]));

    assert_eq!(result.order_count, 4);
    assert_eq!(
        kinds(&result.errors),
        [
            ("SHORT", OrderCheckErrorKind::InsufficientStock),
            ("NOSHIP", OrderCheckErrorKind::NoShippingMethod),
            ("SPLIT", OrderCheckErrorKind::NotAllOrdersSelected),
        ]
    );

    let fulfillable: Vec<_> = result
        .fulfillable_orders(&orders)
        .iter()
        .map(|o| o.code.as_str())
        .collect();
    assert_eq!(fulfillable, ["OK", "NOSHIP"]);
}

// =============================================================================
// Pick List
// =============================================================================

#[test]
fn test_pick_list_sorted_and_zero_entries_dropped() {
    let order = OrderFixture::new("1", "AAA")
        .line("L1", "b", 1)
        .line("L2", "a", 2)
        .line("L3", "c", 0)
        .carrier("ups")
        .build();

    let result = check_orders(&[order], &stock(&[("a", 9, 0), ("b", 9, 0), ("c", 9, 0)]));

    let skus: Vec<_> = result.pick_list.iter().map(|e| e.sku.as_str()).collect();
    assert_eq!(skus, ["a", "b"]);
}

#[test]
fn test_pick_list_uses_byte_order() {
    let order = OrderFixture::new("1", "AAA")
        .line("L1", "mug", 1)
        .line("L2", "Mug", 1)
        .line("L3", "MUG-2", 1)
        .carrier("ups")
        .build();

    let result = check_orders(&[order], &stock(&[]));

    let skus: Vec<_> = result.pick_list.iter().map(|e| e.sku.as_str()).collect();
    assert_eq!(skus, ["MUG-2", "Mug", "mug"]);
}

// =============================================================================
// Determinism
// =============================================================================

fn batch() -> Vec<Order> {
    vec![
        OrderFixture::new("1", "AAA")
            .line("L1", "X", 4)
            .fulfillment("F1", "Pending", &[("L1", 4)])
            .build(),
        OrderFixture::new("2", "BBB").line("L2", "X", 2).line("L3", "Y", 1).build(),
        OrderFixture::new("3", "CCC").line("L4", "Y", 5).carrier("dhl").build(),
    ]
}

#[test]
fn test_repeated_runs_are_identical() {
    let levels = stock(&[("X", 3, 4), ("Y", 4, 0)]);

    let first = check_orders(&batch(), &levels);
    let second = check_orders(&batch(), &stock(&[("X", 3, 4), ("Y", 4, 0)]));

    assert_eq!(first, second);
    assert_eq!(levels, stock(&[("X", 3, 4), ("Y", 4, 0)]));
}
