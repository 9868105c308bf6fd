//! Ordering orders by fulfillment priority.

use std::cmp::Ordering;

use crate::types::Order;

/// Sort orders oldest-placed-first, ready for [`check_orders`](crate::check::check_orders).
///
/// Orders without a placement date go last. The sort is stable, so orders
/// with equal (or missing) dates keep their relative positions.
pub fn sort_by_priority(orders: &mut [Order]) {
    orders.sort_by(|a, b| match (a.order_placed_at, b.order_placed_at) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
