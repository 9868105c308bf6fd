//! Fulfillment lifecycle states.

use serde::{Deserialize, Serialize};

/// State of a fulfillment (shipment) record.
///
/// Fulfillments progress `Created → Pending → Purchased → Shipped → Delivered`,
/// and may be parked in `OnHold` or end in `Cancelled`. Any state string the
/// remote server adds later deserializes as [`FulfillmentState::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FulfillmentState {
    Created,
    /// Stock for the fulfillment's lines has been allocated.
    Pending,
    /// A shipping label has been bought.
    Purchased,
    Shipped,
    Delivered,
    OnHold,
    Cancelled,
    #[serde(other)]
    Other,
}

impl FulfillmentState {
    /// Whether this is an in-progress fulfillment for its order.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Created | Self::Pending | Self::OnHold)
    }

    /// Whether the fulfillment's lines have already reserved stock.
    ///
    /// Every allocated state is also active.
    #[must_use]
    pub const fn is_allocated(self) -> bool {
        matches!(self, Self::Pending)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Pending => "Pending",
            Self::Purchased => "Purchased",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::OnHold => "OnHold",
            Self::Cancelled => "Cancelled",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for FulfillmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FulfillmentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Pending" => Ok(Self::Pending),
            "Purchased" => Ok(Self::Purchased),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "OnHold" => Ok(Self::OnHold),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid fulfillment state: {s}")),
        }
    }
}
