//! Stock snapshots and working allocation maps.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

/// Stock figures for one SKU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    /// Units physically on hand.
    #[serde(default)]
    pub stock_on_hand: i64,
    /// Units reserved against fulfillments.
    #[serde(default)]
    pub stock_allocated: i64,
}

/// Caller-supplied stock snapshot keyed by SKU.
pub type StockLevelMap = HashMap<String, StockLevel>;

/// Look up a SKU in a snapshot, treating unknown SKUs as `{0, 0}`.
#[must_use]
pub fn stock_from(stock: &StockLevelMap, sku: &str) -> StockLevel {
    stock.get(sku).copied().unwrap_or_default()
}

/// Per-SKU stock deltas accumulated during a check run.
///
/// Entries hold *changes*, not absolute levels: reserving `n` units adds `n`
/// to `stock_allocated` and subtracts `n` from `stock_on_hand`. Absolute
/// availability is the snapshot's on-hand figure plus the on-hand delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationMap {
    entries: HashMap<String, StockLevel>,
}

impl AllocationMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `quantity` units of `sku`, creating a zeroed entry on first touch.
    pub fn adjust(&mut self, sku: &str, quantity: u32) {
        let level = self.entries.entry(sku.to_owned()).or_default();
        level.stock_allocated += i64::from(quantity);
        level.stock_on_hand -= i64::from(quantity);
    }

    /// Units reserved for `sku`, or 0 if it was never touched.
    #[must_use]
    pub fn allocated(&self, sku: &str) -> i64 {
        self.entries.get(sku).map_or(0, |level| level.stock_allocated)
    }

    /// On-hand delta for `sku` (zero or negative), or 0 if never touched.
    #[must_use]
    pub fn on_hand_delta(&self, sku: &str) -> i64 {
        self.entries.get(sku).map_or(0, |level| level.stock_on_hand)
    }

    /// Fold every delta from `other` into this map.
    pub fn absorb(&mut self, other: &Self) {
        for (sku, delta) in &other.entries {
            let level = self.entries.entry(sku.clone()).or_default();
            level.stock_allocated += delta.stock_allocated;
            level.stock_on_hand += delta.stock_on_hand;
        }
    }

    /// Whether no SKU has been touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over touched SKUs and their deltas, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, StockLevel> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AllocationMap {
    type Item = (&'a String, &'a StockLevel);
    type IntoIter = hash_map::Iter<'a, String, StockLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
