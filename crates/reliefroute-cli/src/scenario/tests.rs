use reliefroute::ErrorKind;
use reliefroute_test::{demo_areas, demo_inventory};

use super::*;

#[test]
fn test_demo_scenario_matches_fixtures() {
    let prepared = Scenario::demo().unwrap().prepare().unwrap();

    assert_eq!(prepared.areas, demo_areas());
    assert_eq!(prepared.inventory, demo_inventory());
    assert_eq!(prepared.network.centers().len(), 2);
    assert_eq!(prepared.depot, Point::ORIGIN);
    assert_eq!(prepared.history.len(), 3);
    assert_eq!(prepared.features.len(), 3);
    assert_eq!(prepared.forecast, vec![vec![1.0, 26.0]; 3]);
}

#[test]
fn test_demo_engine_is_reproducible() {
    let scenario = Scenario::demo().unwrap();
    let engine = scenario.engine.unwrap();
    assert_eq!(engine.effective_seed(), Some(0));
}

#[test]
fn test_area_forecast_overrides_shared() {
    let scenario = Scenario::from_toml_str(
        r#"
        depot = [1.0, 1.0]
        forecast = [1.0]

        [[areas]]
        id = "a"
        location = [0.0, 0.0]
        population = 10
        vulnerability = 1.0
        history = [5.0]
        features = [1.0]
        forecast = [9.0]

        [[areas]]
        id = "b"
        location = [2.0, 0.0]
        population = 10
        vulnerability = 1.0
        history = [6.0]
        features = [2.0]
        "#,
    )
    .unwrap();

    let prepared = scenario.prepare().unwrap();
    assert_eq!(prepared.forecast, vec![vec![9.0], vec![1.0]]);
    assert_eq!(prepared.depot, Point::new(1.0, 1.0));
    assert!(prepared.inventory.is_empty());
}

#[test]
fn test_missing_forecast_is_usage_error() {
    let scenario = Scenario::from_toml_str(
        r#"
        [[areas]]
        id = "a"
        location = [0.0, 0.0]
        population = 10
        vulnerability = 1.0
        history = [5.0]
        features = [1.0]
        "#,
    )
    .unwrap();
    assert!(matches!(scenario.prepare(), Err(CliError::Usage(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let scenario = Scenario::from_toml_str(
        r#"
        forecast = [1.0]

        [[areas]]
        id = "a"
        location = [0.0, 0.0]
        population = 10
        vulnerability = -1.0
        history = [5.0]
        features = [1.0]
        "#,
    )
    .unwrap();
    match scenario.prepare() {
        Err(CliError::Relief(err)) => assert_eq!(err.kind(), ErrorKind::Validation),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_unknown_fields_fail_to_parse() {
    let err = Scenario::from_toml_str("areas = []\nbogus = 1\n").unwrap_err();
    assert!(matches!(err, CliError::Scenario(_)));
}
