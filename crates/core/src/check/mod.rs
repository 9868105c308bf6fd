//! Order fulfillability checks and pick-list reconciliation.
//!
//! [`check_orders`] takes the orders an operator has selected, plus a stock
//! snapshot, and works out which of them can be fulfilled without overselling.
//! It also produces the pick list: how many units of each SKU the warehouse
//! has to gather for the batch.
//!
//! # Priority
//!
//! Orders are evaluated in slice order and earlier orders get first claim on
//! scarce stock. Callers must pass orders already sorted by fulfillment
//! priority, usually oldest-placed-first (see [`crate::priority`]).
//!
//! # Merged fulfillments
//!
//! A fulfillment can cover lines from several orders. Each fulfillment ID is
//! counted once per run no matter how many orders reference it, and every
//! order line it references must belong to one of the checked orders.

mod lines;
pub mod result;

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::types::{AllocationMap, Fulfillment, FulfillmentId, Order, StockLevelMap, stock_from};

pub use lines::MissingLineRef;
use lines::{LineIndex, ResolvedLine};
pub use result::{OrderCheckError, OrderCheckErrorKind, OrderCheckResult, PickListEntry, StockShortfall};

/// What a single order contributes to the run.
enum Demand<'a> {
    /// Unprocessed pending fulfillments. Their stock is already committed, so
    /// they go on the pick list without an availability check.
    PreAllocated {
        fulfillments: Vec<&'a Fulfillment>,
        lines: Vec<ResolvedLine<'a>>,
    },
    /// The order's active fulfillment was counted through an earlier order.
    AlreadyCounted,
    /// The order's active fulfillment, seen for the first time.
    Fulfillment {
        fulfillment: &'a Fulfillment,
        lines: Vec<ResolvedLine<'a>>,
    },
    /// No fulfillment yet: the order's own lines.
    OrderLines(Vec<ResolvedLine<'a>>),
}

/// Check which orders can be fulfilled from the given stock.
///
/// `orders` must be fully hydrated (lines with SKUs, fulfillments with their
/// lines) and sorted by priority: stock is handed out in slice order. `stock`
/// is never modified.
///
/// Every order ends up either contributing to the pick list or with exactly
/// one entry in [`OrderCheckResult::errors`]. Orders whose current or pending
/// fulfillment reaches outside the given orders are reported as
/// `not-all-orders-selected` and skipped; the rest of the run carries on.
#[must_use]
#[instrument(skip_all, fields(orders = orders.len(), skus = stock.len()))]
pub fn check_orders(orders: &[Order], stock: &StockLevelMap) -> OrderCheckResult {
    let index = LineIndex::build(orders);

    let mut run_allocated = AllocationMap::new();
    let mut pre_allocated = AllocationMap::new();
    let mut processed: HashSet<&FulfillmentId> = HashSet::new();

    let mut errors = Vec::new();
    let mut insufficient_stock = 0;

    for order in orders {
        let current = order.current_fulfillment();
        let missing_shipping = current.is_none() && !order.has_shipping_method();

        let demand = match resolve_demand(order, current, &index, &processed) {
            Ok(demand) => demand,
            Err(missing) => {
                warn!(order_code = %order.code, %missing, "Order not checked");
                errors.push(OrderCheckError::NotAllOrdersSelected {
                    order_id: order.id.clone(),
                    order_code: order.code.clone(),
                });
                continue;
            }
        };

        let lines = match demand {
            Demand::PreAllocated { fulfillments, lines } => {
                processed.extend(fulfillments.iter().copied().map(|f| &f.id));
                for line in &lines {
                    pre_allocated.adjust(line.sku, line.quantity);
                }
                debug!(
                    order_code = %order.code,
                    fulfillments = fulfillments.len(),
                    "Counted pre-allocated fulfillments"
                );
                continue;
            }
            Demand::AlreadyCounted => {
                debug!(order_code = %order.code, "Fulfillment already counted via another order");
                continue;
            }
            Demand::Fulfillment { fulfillment, lines } => {
                processed.insert(&fulfillment.id);
                lines
            }
            Demand::OrderLines(lines) => lines,
        };

        let mut locally_allocated = AllocationMap::new();
        let mut shortfalls = Vec::new();

        for line in &lines {
            let available = stock_from(stock, line.sku).stock_on_hand
                + run_allocated.on_hand_delta(line.sku)
                + locally_allocated.on_hand_delta(line.sku);

            if i64::from(line.quantity) > available {
                shortfalls.push(StockShortfall {
                    sku: line.sku.to_owned(),
                    requested: line.quantity,
                    available,
                });
            }
            locally_allocated.adjust(line.sku, line.quantity);
        }

        if !shortfalls.is_empty() {
            debug!(order_code = %order.code, skus = shortfalls.len(), "Insufficient stock");
            insufficient_stock += 1;
            errors.push(OrderCheckError::InsufficientStock {
                order_id: order.id.clone(),
                order_code: order.code.clone(),
                lines: shortfalls,
            });
        } else if missing_shipping {
            debug!(order_code = %order.code, "No shipping method selected");
            errors.push(OrderCheckError::NoShippingMethod {
                order_id: order.id.clone(),
                order_code: order.code.clone(),
            });
        }

        run_allocated.absorb(&locally_allocated);
    }

    let pick_list = build_pick_list(stock, &run_allocated, &pre_allocated);

    debug!(
        errors = errors.len(),
        insufficient_stock,
        pick_list = pick_list.len(),
        "Order check complete"
    );

    OrderCheckResult {
        errors,
        order_count: orders.len(),
        insufficient_stock,
        pick_list,
    }
}

/// Work out which lines an order contributes, without touching run state.
fn resolve_demand<'a>(
    order: &'a Order,
    current: Option<&'a Fulfillment>,
    index: &LineIndex<'a>,
    processed: &HashSet<&'a FulfillmentId>,
) -> Result<Demand<'a>, MissingLineRef> {
    let mut pending: Vec<&'a Fulfillment> = Vec::new();
    for fulfillment in order.allocated_fulfillments() {
        if !processed.contains(&fulfillment.id) && !pending.iter().any(|p| p.id == fulfillment.id) {
            pending.push(fulfillment);
        }
    }

    if !pending.is_empty() {
        let mut lines = Vec::new();
        for fulfillment in &pending {
            lines.extend(index.resolve(fulfillment)?);
        }
        return Ok(Demand::PreAllocated {
            fulfillments: pending,
            lines,
        });
    }

    match current {
        Some(fulfillment) if processed.contains(&fulfillment.id) => Ok(Demand::AlreadyCounted),
        Some(fulfillment) => Ok(Demand::Fulfillment {
            fulfillment,
            lines: index.resolve(fulfillment)?,
        }),
        None => Ok(Demand::OrderLines(
            order.lines.iter().map(ResolvedLine::from).collect(),
        )),
    }
}

fn build_pick_list(
    stock: &StockLevelMap,
    run_allocated: &AllocationMap,
    pre_allocated: &AllocationMap,
) -> Vec<PickListEntry> {
    let entry_for = |sku: &str, needed: i64| {
        let level = stock_from(stock, sku);
        PickListEntry {
            sku: sku.to_owned(),
            quantity_needed: needed,
            quantity_used: needed,
            on_hand: level.stock_on_hand,
            total_allocated: level.stock_allocated,
        }
    };

    let mut entries: BTreeMap<&str, PickListEntry> = run_allocated
        .iter()
        .map(|(sku, level)| (sku.as_str(), entry_for(sku, level.stock_allocated)))
        .collect();

    for (sku, level) in pre_allocated {
        if level.stock_allocated <= 0 {
            continue;
        }
        entries
            .entry(sku.as_str())
            .and_modify(|entry| entry.quantity_used += level.stock_allocated)
            .or_insert_with(|| PickListEntry {
                quantity_needed: 0,
                ..entry_for(sku, level.stock_allocated)
            });
    }

    entries
        .into_values()
        .filter(|entry| entry.quantity_used > 0)
        .collect()
}
