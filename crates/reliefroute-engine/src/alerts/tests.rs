//! Tests for the alert monitor.

use reliefroute_core::ErrorKind;
use reliefroute_test::demo_inventory;

use super::*;

#[test]
fn test_inventory_alerts_use_threshold() {
    let inventory =
        InventorySnapshot::from_items([("rice", 1000.0), ("oil", 40.0), ("salt", 99.9)]).unwrap();
    let mut monitor = AlertMonitor::new(AlertConfig::default());

    assert_eq!(monitor.check_inventory_levels(&inventory), 2);
    let messages: Vec<&str> = monitor
        .active_alerts()
        .map(|alert| alert.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Low inventory alert: oil is below threshold (40 units remaining)",
            "Low inventory alert: salt is below threshold (99.9 units remaining)",
        ]
    );
    assert!(monitor
        .alerts()
        .iter()
        .all(|alert| alert.kind == AlertKind::Inventory));
}

#[test]
fn test_demo_inventory_raises_nothing() {
    let mut monitor = AlertMonitor::new(AlertConfig::default());
    assert_eq!(monitor.check_inventory_levels(&demo_inventory()), 0);
    assert!(monitor.alerts().is_empty());
}

#[test]
fn test_threshold_from_config() {
    let config = EngineConfig::new().with_low_stock_threshold(600.0);
    let mut monitor = AlertMonitor::from_config(&config);
    // oil 500 and sugar 400
    assert_eq!(monitor.check_inventory_levels(&demo_inventory()), 2);
}

#[test]
fn test_demand_spike_is_strict() {
    let mut monitor = AlertMonitor::new(AlertConfig::default());
    assert!(!monitor.check_demand_spike("area1", 150.0, 100.0));
    assert!(monitor.check_demand_spike("area1", 150.01, 100.0));

    let alert = &monitor.alerts()[0];
    assert_eq!(alert.kind, AlertKind::Demand);
    assert!(alert.message.starts_with("Demand spike detected in area1"));
}

#[test]
fn test_resolve() {
    let mut monitor = AlertMonitor::new(AlertConfig::default());
    monitor.raise(AlertKind::Inventory, "first");
    monitor.raise(AlertKind::Demand, "second");

    monitor.resolve(0).unwrap();
    let active: Vec<&str> = monitor.active_alerts().map(|a| a.message.as_str()).collect();
    assert_eq!(active, ["second"]);
    assert_eq!(monitor.alerts()[0].status, AlertStatus::Resolved);

    // Resolving twice is harmless.
    monitor.resolve(0).unwrap();
    assert_eq!(monitor.alerts().len(), 2);
}

#[test]
fn test_resolve_out_of_range() {
    let mut monitor = AlertMonitor::new(AlertConfig::default());
    let err = monitor.resolve(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Invalid alert index"));
}
