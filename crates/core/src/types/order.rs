//! Hydrated order records as supplied by the admin data layer.
//!
//! Field names follow the admin API's camelCase JSON so a query result can be
//! deserialized straight into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{FulfillmentId, OrderId, OrderLineId};
use super::status::FulfillmentState;

// =============================================================================
// Order Types
// =============================================================================

/// An order with its lines and any fulfillments already created against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Human-readable order code.
    pub code: String,
    /// Order lifecycle state (not interpreted by the checker).
    #[serde(default)]
    pub state: String,
    /// When the customer placed the order.
    #[serde(default)]
    pub order_placed_at: Option<DateTime<Utc>>,
    /// Order lines, the full demand when nothing has been fulfilled yet.
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    /// Fulfillments linked to this order, possibly shared with other orders.
    #[serde(default)]
    pub fulfillments: Option<Vec<Fulfillment>>,
    /// Shipping selection custom fields.
    #[serde(default)]
    pub custom_fields: Option<OrderCustomFields>,
}

impl Order {
    fn fulfillment_iter(&self) -> impl Iterator<Item = &Fulfillment> {
        self.fulfillments.iter().flatten()
    }

    /// The in-progress fulfillment for this order.
    ///
    /// If several fulfillments are active at once the first one in list order
    /// wins. That should not happen, and the list order is whatever the data
    /// layer returned.
    #[must_use]
    pub fn current_fulfillment(&self) -> Option<&Fulfillment> {
        self.fulfillment_iter().find(|f| f.state.is_active())
    }

    /// Fulfillments whose lines have already reserved stock.
    pub fn allocated_fulfillments(&self) -> impl Iterator<Item = &Fulfillment> {
        self.fulfillment_iter().filter(|f| f.state.is_allocated())
    }

    /// Whether a carrier or service has been chosen for this order.
    #[must_use]
    pub fn has_shipping_method(&self) -> bool {
        self.custom_fields
            .as_ref()
            .is_some_and(OrderCustomFields::has_shipping_method)
    }
}

/// A single order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Order line ID.
    pub id: OrderLineId,
    /// Product variant being ordered.
    pub product_variant: ProductVariantRef,
    /// Ordered quantity.
    pub quantity: u32,
}

/// The part of a product variant the checker needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantRef {
    /// SKU code.
    pub sku: String,
}

/// Order custom fields holding the selected shipping method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomFields {
    /// Selected carrier code.
    #[serde(default)]
    pub carrier_code: Option<String>,
    /// Selected carrier service code.
    #[serde(default)]
    pub service_code: Option<String>,
}

impl OrderCustomFields {
    /// Whether either code is set. Empty strings count as unset.
    #[must_use]
    pub fn has_shipping_method(&self) -> bool {
        let present = |code: &Option<String>| code.as_deref().is_some_and(|c| !c.is_empty());
        present(&self.carrier_code) || present(&self.service_code)
    }
}

// =============================================================================
// Fulfillment Types
// =============================================================================

/// A shipment-in-progress, possibly covering lines from several orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    /// Fulfillment ID.
    pub id: FulfillmentId,
    /// Current state.
    pub state: FulfillmentState,
    /// Lines included in this fulfillment.
    #[serde(default)]
    pub lines: Vec<FulfillmentLine>,
}

/// A reference from a fulfillment to an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentLine {
    /// The order line being fulfilled.
    pub order_line_id: OrderLineId,
    /// Quantity of that line included in the fulfillment.
    pub quantity: u32,
}
