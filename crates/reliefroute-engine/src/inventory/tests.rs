//! Tests for the inventory ledger.

use chrono::{TimeZone, Utc};
use reliefroute_core::ErrorKind;
use reliefroute_test::demo_inventory;

use super::*;

#[test]
fn test_add_and_remove_record_transactions() {
    let mut ledger = InventoryLedger::new();
    let when = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();

    let tx = ledger
        .update_at("beans", 300.0, StockOperation::Add, when)
        .unwrap()
        .clone();
    assert_eq!(
        tx,
        Transaction {
            item: "beans".into(),
            quantity: 300.0,
            operation: StockOperation::Add,
            timestamp: when,
            level: 300.0,
        }
    );

    ledger
        .update_at("beans", 120.0, StockOperation::Remove, when)
        .unwrap();
    assert_eq!(ledger.level("beans"), Some(180.0));
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(ledger.transactions()[1].level, 180.0);
}

#[test]
fn test_insufficient_stock_leaves_ledger_untouched() {
    let mut ledger = InventoryLedger::new();
    ledger.update("oil", 50.0, StockOperation::Add).unwrap();

    let err = ledger
        .update("oil", 60.0, StockOperation::Remove)
        .unwrap_err();
    assert_eq!(err, ReliefError::validation("Insufficient inventory for oil"));
    assert_eq!(ledger.level("oil"), Some(50.0));
    assert_eq!(ledger.transactions().len(), 1);

    // Removing an unknown item does not create it.
    assert!(ledger.update("salt", 1.0, StockOperation::Remove).is_err());
    assert_eq!(ledger.level("salt"), None);
}

#[test]
fn test_zero_removal_of_unknown_item_is_rejected() {
    let mut ledger = InventoryLedger::new();
    let err = ledger
        .update("salt", 0.0, StockOperation::Remove)
        .unwrap_err();
    assert_eq!(err, ReliefError::validation("Unknown inventory item salt"));
    assert_eq!(ledger.level("salt"), None);
    assert!(ledger.levels().is_empty());
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_overflowing_add_is_rejected() {
    let mut ledger = InventoryLedger::new();
    ledger.update("rice", 1e308, StockOperation::Add).unwrap();
    ledger.update("beans", 500.0, StockOperation::Add).unwrap();

    let err = ledger
        .update("rice", 1e308, StockOperation::Add)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(ledger.level("rice"), Some(1e308));
    assert_eq!(ledger.transactions().len(), 2);

    let snapshot = ledger.snapshot().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("rice"), Some(1e308));
    assert_eq!(snapshot.get("beans"), Some(500.0));
}

#[test]
fn test_removing_everything_is_allowed() {
    let mut ledger = InventoryLedger::new();
    ledger.update("flour", 10.0, StockOperation::Add).unwrap();
    ledger.update("flour", 10.0, StockOperation::Remove).unwrap();
    assert_eq!(ledger.level("flour"), Some(0.0));
}

#[test]
fn test_invalid_quantities() {
    let mut ledger = InventoryLedger::new();
    for quantity in [-1.0, f64::NAN, f64::INFINITY] {
        let err = ledger
            .update("rice", quantity, StockOperation::Add)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(ledger.update("", 1.0, StockOperation::Add).is_err());
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_snapshot_round_trip() {
    let inventory = demo_inventory();
    let ledger = InventoryLedger::from_snapshot(&inventory);

    assert_eq!(ledger.snapshot().unwrap(), inventory);
    assert_eq!(ledger.transactions().len(), 5);
    assert!(ledger
        .transactions()
        .iter()
        .all(|tx| tx.operation == StockOperation::Add && tx.level == tx.quantity));
}

#[test]
fn test_low_stock_and_summary() {
    let mut ledger = InventoryLedger::new();
    ledger.update("rice", 1000.0, StockOperation::Add).unwrap();
    ledger.update("oil", 40.0, StockOperation::Add).unwrap();
    ledger.update("sugar", 100.0, StockOperation::Add).unwrap();

    let low = ledger.low_stock(100.0);
    assert_eq!(
        low,
        vec![LowStockItem {
            item: "oil".into(),
            level: 40.0,
            threshold: 100.0,
        }]
    );

    let summary = ledger.summary(100.0);
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.total_quantity, 1140.0);
    assert_eq!(summary.average_quantity, 380.0);
    assert_eq!(summary.low_stock_count, 1);

    assert_eq!(ledger.summary(2000.0).low_stock_count, 3);
}

#[test]
fn test_empty_summary_is_zero() {
    let ledger = InventoryLedger::new();
    assert_eq!(ledger.summary(100.0), StockSummary::default());
    assert!(ledger.low_stock(100.0).is_empty());
    assert!(ledger.snapshot().unwrap().is_empty());
}
