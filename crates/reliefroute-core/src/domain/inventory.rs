//! Inventory snapshots.

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::ensure_finite;
use crate::error::{ReliefError, Result};

/// Available quantity per food item at one point in time.
///
/// Quantities are finite and non-negative. Items iterate in name order.
///
/// # Examples
///
/// ```
/// use reliefroute_core::InventorySnapshot;
///
/// let stock = InventorySnapshot::from_items([("rice", 1000.0), ("beans", 800.0)]).unwrap();
/// assert_eq!(stock.total(), 1800.0);
/// assert_eq!(stock.get("beans"), Some(800.0));
/// assert!(InventorySnapshot::from_items([("oil", -1.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")
)]
pub struct InventorySnapshot {
    items: BTreeMap<String, f64>,
}

impl InventorySnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(item, quantity)` pairs. Later duplicates win.
    pub fn from_items<I, K>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut snapshot = Self::new();
        for (item, quantity) in items {
            snapshot.insert(item, quantity)?;
        }
        Ok(snapshot)
    }

    /// Sets the quantity of an item.
    pub fn insert(&mut self, item: impl Into<String>, quantity: f64) -> Result<()> {
        let item = item.into();
        let quantity = ensure_finite("quantity", quantity)?;
        if quantity < 0.0 {
            return Err(ReliefError::validation(format!(
                "quantity of {item} must be non-negative, got {quantity}"
            )));
        }
        self.items.insert(item, quantity);
        Ok(())
    }

    /// Returns the quantity of an item, if present.
    pub fn get(&self, item: &str) -> Option<f64> {
        self.items.get(item).copied()
    }

    /// Sum of all quantities.
    pub fn total(&self) -> f64 {
        self.items.values().sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates `(item, quantity)` pairs in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(item, quantity)| (item.as_str(), *quantity))
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.items
    }
}

impl TryFrom<BTreeMap<String, f64>> for InventorySnapshot {
    type Error = ReliefError;

    fn try_from(items: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_items(items)
    }
}

impl From<InventorySnapshot> for BTreeMap<String, f64> {
    fn from(snapshot: InventorySnapshot) -> Self {
        snapshot.items
    }
}

impl<'a> IntoIterator for &'a InventorySnapshot {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
