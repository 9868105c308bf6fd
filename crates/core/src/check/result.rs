//! Output of an order check: per-order errors and the consolidated pick list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Order, OrderId};

/// Result of [`check_orders`](super::check_orders).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCheckResult {
    /// At most one problem per order, in input order.
    pub errors: Vec<OrderCheckError>,
    /// Number of orders passed in, whether or not they passed.
    pub order_count: usize,
    /// Number of orders that failed because of stock.
    pub insufficient_stock: usize,
    /// Units to pick per SKU, sorted by SKU.
    pub pick_list: Vec<PickListEntry>,
}

impl OrderCheckResult {
    /// Whether every order passed without an error or warning.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.errors.is_empty()
    }

    /// IDs of orders that must be left out of a fulfillment request.
    ///
    /// A missing shipping method does not block an order; the server can still
    /// be asked to pick a method when the fulfillment is created.
    #[must_use]
    pub fn blocked_order_ids(&self) -> HashSet<&OrderId> {
        self.errors
            .iter()
            .filter(|e| e.kind().is_blocking())
            .map(OrderCheckError::order_id)
            .collect()
    }

    /// The subset of `orders` that is not blocked, in their original order.
    #[must_use]
    pub fn fulfillable_orders<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let blocked = self.blocked_order_ids();
        orders.iter().filter(|o| !blocked.contains(&o.id)).collect()
    }

    /// Errors that do not block the order.
    pub fn warnings(&self) -> impl Iterator<Item = &OrderCheckError> {
        self.errors.iter().filter(|e| !e.kind().is_blocking())
    }

    /// Errors recorded for one order.
    pub fn errors_for<'a>(
        &'a self,
        order_id: &'a OrderId,
    ) -> impl Iterator<Item = &'a OrderCheckError> + 'a {
        self.errors.iter().filter(move |e| e.order_id() == order_id)
    }
}

/// A problem that stops an order from being fulfilled as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OrderCheckError {
    /// One or more lines need more units than remain available.
    #[serde(rename_all = "camelCase")]
    InsufficientStock {
        order_id: OrderId,
        order_code: String,
        lines: Vec<StockShortfall>,
    },
    /// No active fulfillment and no carrier or service selected.
    #[serde(rename_all = "camelCase")]
    NoShippingMethod { order_id: OrderId, order_code: String },
    /// A fulfillment on this order covers lines from an order that was not
    /// part of the check, usually the other half of a merged fulfillment.
    #[serde(rename_all = "camelCase")]
    NotAllOrdersSelected { order_id: OrderId, order_code: String },
}

impl OrderCheckError {
    #[must_use]
    pub const fn kind(&self) -> OrderCheckErrorKind {
        match self {
            Self::InsufficientStock { .. } => OrderCheckErrorKind::InsufficientStock,
            Self::NoShippingMethod { .. } => OrderCheckErrorKind::NoShippingMethod,
            Self::NotAllOrdersSelected { .. } => OrderCheckErrorKind::NotAllOrdersSelected,
        }
    }

    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::InsufficientStock { order_id, .. }
            | Self::NoShippingMethod { order_id, .. }
            | Self::NotAllOrdersSelected { order_id, .. } => order_id,
        }
    }

    #[must_use]
    pub fn order_code(&self) -> &str {
        match self {
            Self::InsufficientStock { order_code, .. }
            | Self::NoShippingMethod { order_code, .. }
            | Self::NotAllOrdersSelected { order_code, .. } => order_code,
        }
    }

    /// Per-SKU shortfalls; empty for anything but `InsufficientStock`.
    #[must_use]
    pub fn shortfalls(&self) -> &[StockShortfall] {
        match self {
            Self::InsufficientStock { lines, .. } => lines,
            _ => &[],
        }
    }
}

/// Discriminant of [`OrderCheckError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderCheckErrorKind {
    InsufficientStock,
    NoShippingMethod,
    NotAllOrdersSelected,
}

impl OrderCheckErrorKind {
    /// Whether an order with this error must be excluded from fulfillment.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::InsufficientStock | Self::NotAllOrdersSelected)
    }
}

impl std::fmt::Display for OrderCheckErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientStock => write!(f, "insufficient-stock"),
            Self::NoShippingMethod => write!(f, "no-shipping-method"),
            Self::NotAllOrdersSelected => write!(f, "not-all-orders-selected"),
        }
    }
}

/// A single SKU an order cannot get enough of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub sku: String,
    /// Units the order line asks for.
    pub requested: u32,
    /// Units left once everything reserved earlier in the run is taken out.
    /// May be negative when earlier orders over-reserved the SKU.
    pub available: i64,
}

/// One row of the pick list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickListEntry {
    pub sku: String,
    /// Units newly reserved by this run.
    pub quantity_needed: i64,
    /// Units to pick, including stock already allocated to pending fulfillments.
    pub quantity_used: i64,
    /// Snapshot on-hand figure.
    pub on_hand: i64,
    /// Snapshot allocated figure.
    pub total_allocated: i64,
}
