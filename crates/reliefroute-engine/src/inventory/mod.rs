//! Stock levels with a transaction history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use reliefroute_core::{InventorySnapshot, ReliefError, Result};

#[cfg(test)]
mod tests;

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StockOperation {
    Add,
    Remove,
}

/// One successful stock update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transaction {
    pub item: String,
    pub quantity: f64,
    pub operation: StockOperation,
    pub timestamp: DateTime<Utc>,
    /// Stock level of `item` after the update.
    pub level: f64,
}

/// An item whose stock is below a threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LowStockItem {
    pub item: String,
    pub level: f64,
    pub threshold: f64,
}

/// Aggregate figures over all items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StockSummary {
    pub total_items: usize,
    pub total_quantity: f64,
    pub average_quantity: f64,
    pub low_stock_count: usize,
}

/// Food stock per item, ordered by item name.
///
/// # Examples
///
/// ```
/// use reliefroute_engine::{InventoryLedger, StockOperation};
///
/// let mut ledger = InventoryLedger::new();
/// ledger.update("rice", 1000.0, StockOperation::Add).unwrap();
/// ledger.update("rice", 250.0, StockOperation::Remove).unwrap();
///
/// assert_eq!(ledger.level("rice"), Some(750.0));
/// assert_eq!(ledger.transactions().len(), 2);
/// assert!(ledger.update("rice", 800.0, StockOperation::Remove).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    levels: BTreeMap<String, f64>,
    transactions: Vec<Transaction>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger stocked from a snapshot, one `Add` transaction per item.
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        let now = Utc::now();
        let mut ledger = Self::new();
        for (item, quantity) in snapshot.iter() {
            ledger.levels.insert(item.to_string(), quantity);
            ledger.transactions.push(Transaction {
                item: item.to_string(),
                quantity,
                operation: StockOperation::Add,
                timestamp: now,
                level: quantity,
            });
        }
        ledger
    }

    /// Applies a stock change stamped with the current time.
    pub fn update(
        &mut self,
        item: &str,
        quantity: f64,
        operation: StockOperation,
    ) -> Result<&Transaction> {
        self.update_at(item, quantity, operation, Utc::now())
    }

    /// Applies a stock change with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// - `Validation` for a negative or non-finite quantity, when removing an
    ///   item that was never stocked, or when removing more than is in stock.
    /// - `Domain` if adding would push the level past the range of `f64`.
    ///
    /// A failed update leaves the ledger untouched.
    pub fn update_at(
        &mut self,
        item: &str,
        quantity: f64,
        operation: StockOperation,
        timestamp: DateTime<Utc>,
    ) -> Result<&Transaction> {
        if item.is_empty() {
            return Err(ReliefError::validation("item name must not be empty"));
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ReliefError::validation(format!(
                "quantity must be finite and non-negative, got {quantity}"
            )));
        }

        let current = self.levels.get(item).copied();
        let level = match (operation, current) {
            (StockOperation::Add, current) => {
                let level = current.unwrap_or(0.0) + quantity;
                if !level.is_finite() {
                    return Err(ReliefError::Domain(format!(
                        "stock level for {item} overflows"
                    )));
                }
                level
            }
            (StockOperation::Remove, None) => {
                return Err(ReliefError::validation(format!(
                    "Unknown inventory item {item}"
                )));
            }
            (StockOperation::Remove, Some(current)) if current >= quantity => current - quantity,
            (StockOperation::Remove, Some(_)) => {
                return Err(ReliefError::validation(format!(
                    "Insufficient inventory for {item}"
                )));
            }
        };
        self.levels.insert(item.to_string(), level);

        debug!(event = "stock_update", item, ?operation, quantity, level);
        self.transactions.push(Transaction {
            item: item.to_string(),
            quantity,
            operation,
            timestamp,
            level,
        });
        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    pub fn level(&self, item: &str) -> Option<f64> {
        self.levels.get(item).copied()
    }

    /// Current level of every item.
    pub fn levels(&self) -> &BTreeMap<String, f64> {
        &self.levels
    }

    /// Copies the current levels into a snapshot for the allocator.
    pub fn snapshot(&self) -> Result<InventorySnapshot> {
        InventorySnapshot::try_from(self.levels.clone())
    }

    /// All successful updates in order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Items strictly below `threshold`, in item order.
    pub fn low_stock(&self, threshold: f64) -> Vec<LowStockItem> {
        self.levels
            .iter()
            .filter(|(_, &level)| level < threshold)
            .map(|(item, &level)| LowStockItem {
                item: item.clone(),
                level,
                threshold,
            })
            .collect()
    }

    /// Item count, totals and the number of items below `threshold`.
    pub fn summary(&self, threshold: f64) -> StockSummary {
        if self.levels.is_empty() {
            return StockSummary::default();
        }
        let total_quantity: f64 = self.levels.values().sum();
        StockSummary {
            total_items: self.levels.len(),
            total_quantity,
            average_quantity: total_quantity / self.levels.len() as f64,
            low_stock_count: self.levels.values().filter(|&&l| l < threshold).count(),
        }
    }
}
