use super::*;

fn visitor(event: &str) -> EventVisitor {
    EventVisitor {
        event: Some(event.to_string()),
        ..EventVisitor::default()
    }
}

#[test]
fn test_format_quantity() {
    assert_eq!(format_quantity(0.0), "0.00");
    assert_eq!(format_quantity(102.777), "102.78");
    assert_eq!(format_quantity(1234567.891), "1,234,567.89");
    assert_eq!(format_quantity(-5.5), "-5.50");
    assert_eq!(format_quantity(-0.001), "0.00");
    assert_eq!(format_quantity(f64::INFINITY), "inf");
}

#[test]
fn test_unknown_events_are_ignored() {
    assert!(format_event(&visitor("stock_update"), Level::INFO).is_empty());
    assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
}

#[test]
fn test_allocation_line() {
    let v = EventVisitor {
        area: Some("area1".into()),
        base: Some(100.0),
        adjusted: Some(185.0),
        items: Some(2),
        ..visitor("allocation")
    };
    let line = format_event(&v, Level::INFO);
    assert!(line.contains("area1"));
    assert!(line.contains("185.00"));
    assert!(line.contains("100.00"));
}

#[test]
fn test_epoch_only_at_debug_or_finer() {
    let v = EventVisitor {
        epoch: Some(3),
        mse: Some(0.5),
        ..visitor("epoch")
    };
    assert!(format_event(&v, Level::INFO).is_empty());
    assert!(format_event(&v, Level::DEBUG).contains("0.50"));
    assert!(!format_event(&v, Level::TRACE).is_empty());
}

#[test]
fn test_plan_end_summary_box() {
    let v = EventVisitor {
        areas: Some(3),
        allocated: Some(1520.5),
        distance: Some(12.5),
        alerts: Some(1),
        ..visitor("plan_end")
    };
    let output = format_event(&v, Level::INFO);
    assert!(output.contains("Areas served:"));
    assert!(output.contains("1,520.50"));
    assert!(output.contains("12.50"));
    assert!(output.contains("alerts"));
}

#[test]
fn test_alert_line_shows_message() {
    let v = EventVisitor {
        kind: Some("Inventory".into()),
        message: Some("Low inventory alert: oil".into()),
        ..visitor("alert_raised")
    };
    let line = format_event(&v, Level::WARN);
    assert!(line.contains("Inventory"));
    assert!(line.contains("Low inventory alert: oil"));
}

#[test]
fn test_init_is_idempotent() {
    init();
    init();
}
