//! Core types for Fulfillment Desk.
//!
//! This module provides the data contracts the checker consumes: typed IDs,
//! fulfillment states, hydrated orders, and stock levels.

pub mod id;
pub mod order;
pub mod status;
pub mod stock;

pub use id::{FulfillmentId, OrderId, OrderLineId};
pub use order::{
    Fulfillment, FulfillmentLine, Order, OrderCustomFields, OrderLine, ProductVariantRef,
};
pub use status::FulfillmentState;
pub use stock::{AllocationMap, StockLevel, StockLevelMap, stock_from};
