//! Fulfillment Desk Core - order fulfillability checks.
//!
//! This crate provides the logic behind the fulfillment desk's order selection:
//! - [`check`] - decide which selected orders can be fulfilled from current
//!   stock and build the consolidated pick list
//! - [`priority`] - put orders into the order stock should be handed out in
//! - [`types`] - hydrated orders, fulfillments, and stock levels
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no network
//! calls, no persisted state. Fetching orders and stock, and creating
//! fulfillments afterwards, is the caller's job.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod check;
pub mod priority;
pub mod types;

pub use check::{
    MissingLineRef, OrderCheckError, OrderCheckErrorKind, OrderCheckResult, PickListEntry,
    StockShortfall, check_orders,
};
pub use priority::sort_by_priority;
pub use types::*;
