//! Low-inventory and demand-spike alerts.

use chrono::{DateTime, Utc};
use tracing::warn;

use reliefroute_config::{AlertConfig, EngineConfig};
use reliefroute_core::{InventorySnapshot, ReliefError, Result};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlertKind {
    Inventory,
    Demand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlertStatus {
    Active,
    Resolved,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub kind: AlertKind,
    pub status: AlertStatus,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}

/// Collects alerts raised by threshold checks.
///
/// Alerts are never removed; [`resolve`](Self::resolve) marks them resolved
/// and indices stay stable.
///
/// # Examples
///
/// ```
/// use reliefroute_config::AlertConfig;
/// use reliefroute_engine::AlertMonitor;
///
/// let mut monitor = AlertMonitor::new(AlertConfig::default());
/// assert!(monitor.check_demand_spike("area1", 200.0, 100.0));
/// assert!(!monitor.check_demand_spike("area1", 150.0, 100.0));
///
/// assert_eq!(monitor.active_alerts().count(), 1);
/// monitor.resolve(0).unwrap();
/// assert_eq!(monitor.active_alerts().count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlertMonitor {
    config: AlertConfig,
    alerts: Vec<Alert>,
}

impl AlertMonitor {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            alerts: Vec::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.alerts.clone())
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Raises one `Inventory` alert per item below the low-stock threshold.
    ///
    /// Returns the number of alerts raised.
    pub fn check_inventory_levels(&mut self, inventory: &InventorySnapshot) -> usize {
        let threshold = self.config.low_stock_threshold;
        let mut raised = 0;
        for (item, quantity) in inventory.iter() {
            if quantity < threshold {
                self.raise(
                    AlertKind::Inventory,
                    format!(
                        "Low inventory alert: {item} is below threshold ({quantity} units remaining)"
                    ),
                );
                raised += 1;
            }
        }
        raised
    }

    /// Raises a `Demand` alert when `current > average × demand_spike_ratio`.
    ///
    /// Returns whether an alert was raised.
    pub fn check_demand_spike(&mut self, area_id: &str, current: f64, average: f64) -> bool {
        if current > average * self.config.demand_spike_ratio {
            self.raise(
                AlertKind::Demand,
                format!(
                    "Demand spike detected in {area_id}: current demand ({current:.2}) is significantly higher than average ({average:.2})"
                ),
            );
            true
        } else {
            false
        }
    }

    /// Records an active alert stamped with the current time.
    pub fn raise(&mut self, kind: AlertKind, message: impl Into<String>) -> &Alert {
        let message = message.into();
        warn!(event = "alert_raised", ?kind, message = %message);
        self.alerts.push(Alert {
            timestamp: Utc::now(),
            message,
            kind,
            status: AlertStatus::Active,
        });
        let index = self.alerts.len() - 1;
        &self.alerts[index]
    }

    /// Every alert ever raised, in order.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn active_alerts(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter().filter(|alert| alert.is_active())
    }

    /// Marks the alert at `index` as resolved.
    ///
    /// # Errors
    ///
    /// `Validation` if `index` is out of range.
    pub fn resolve(&mut self, index: usize) -> Result<()> {
        let count = self.alerts.len();
        let alert = self.alerts.get_mut(index).ok_or_else(|| {
            ReliefError::validation(format!(
                "Invalid alert index {index}: {count} alerts recorded"
            ))
        })?;
        alert.status = AlertStatus::Resolved;
        Ok(())
    }
}
