use reliefroute_core::ErrorKind;
use reliefroute_engine::{AlertKind, LinearModel};
use reliefroute_test::{demo_areas, demo_history, demo_inventory, demo_training_features};

use super::*;

fn trained_planner(seed: u64) -> DistributionPlanner {
    let config = EngineConfig::new().with_random_seed(seed);
    let mut planner = DistributionPlanner::new(config, demo_areas()).unwrap();
    planner
        .train(
            &TrainingSet::from_histories(demo_history()),
            &demo_training_features(),
        )
        .unwrap();
    planner
}

#[test]
fn test_plan_before_training_is_not_ready() {
    let mut planner = DistributionPlanner::new(EngineConfig::new(), demo_areas()).unwrap();
    let err = planner
        .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &demo_inventory())
        .unwrap_err();
    assert_eq!(err, ReliefError::NotReady);
    assert!(planner.monitor().alerts().is_empty());
}

#[test]
fn test_demo_plan() {
    let mut planner = trained_planner(42);
    let inventory = demo_inventory();
    let plan = planner
        .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &inventory)
        .unwrap();

    assert_eq!(plan.areas.len(), 3);
    let ids: Vec<&str> = plan.visiting_order.iter().map(AreaId::as_str).collect();
    assert_eq!(ids, ["area1", "area2", "area3"]);
    assert_eq!(plan.route.stop_count(), 4);
    assert_eq!(plan.route.depot(), Point::ORIGIN);
    for (stop, id) in plan.route.deliveries().iter().zip(&plan.visiting_order) {
        let area = planner.areas().iter().find(|a| a.id() == id).unwrap();
        assert_eq!(*stop, area.location());
    }

    for area_plan in &plan.areas {
        assert!(area_plan.predicted_demand >= 0.0);
        let allocation = &area_plan.allocation;
        assert_eq!(allocation.base_quantity, area_plan.predicted_demand);
        assert!(allocation.adjusted_quantity <= inventory.total());
        assert!(allocation.total_allocated() <= allocation.adjusted_quantity + 1e-9);
    }

    // The same seed reproduces the same predictions.
    let again = trained_planner(42)
        .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &inventory)
        .unwrap();
    let first: Vec<f64> = plan.areas.iter().map(|a| a.predicted_demand).collect();
    let second: Vec<f64> = again.areas.iter().map(|a| a.predicted_demand).collect();
    assert_eq!(first, second);
}

#[test]
fn test_forecast_count_must_match_areas() {
    let mut planner = trained_planner(1);
    let err = planner
        .plan(Point::ORIGIN, &[vec![1.0, 26.0]], &demo_inventory())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_low_stock_alerts_are_reported() {
    let mut planner = trained_planner(3);
    let inventory = InventorySnapshot::from_items([("rice", 500.0), ("oil", 20.0)]).unwrap();
    let plan = planner
        .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &inventory)
        .unwrap();

    let inventory_alerts: Vec<_> = plan
        .alerts
        .iter()
        .filter(|alert| alert.kind == AlertKind::Inventory)
        .collect();
    assert_eq!(inventory_alerts.len(), 1);
    assert!(inventory_alerts[0].message.contains("oil"));
    assert_eq!(planner.monitor().alerts().len(), plan.alerts.len());
}

#[test]
fn test_demand_spike_against_history() {
    let areas = vec![Area::new("a", Point::new(1.0, 0.0), 100, 0.0).unwrap()];
    let mut planner = DistributionPlanner::new(EngineConfig::new(), areas).unwrap();
    planner
        .train(&TrainingSet::from_histories([("a", vec![10.0])]), &[vec![1.0]])
        .unwrap();
    // Replace the model with a known one: prediction = 100 × 1.1.
    planner.predictor = DemandPredictor::from_model(
        LinearModel::new(vec![0.0], 100.0).unwrap(),
        planner.config.predictor.clone(),
    )
    .unwrap();

    let inventory = InventorySnapshot::from_items([("rice", 1000.0)]).unwrap();
    let plan = planner
        .plan(Point::ORIGIN, &[vec![5.0]], &inventory)
        .unwrap();
    assert_eq!(plan.alerts.len(), 1);
    assert_eq!(plan.alerts[0].kind, AlertKind::Demand);
    assert!((plan.areas[0].predicted_demand - 110.0).abs() < 1e-9);
}

#[test]
fn test_duplicate_areas_rejected() {
    let mut areas = demo_areas();
    areas.push(areas[0].clone());
    let err = DistributionPlanner::new(EngineConfig::new(), areas).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_invalid_config_rejected() {
    let config = EngineConfig::new().with_epochs(0);
    let err = DistributionPlanner::new(config, demo_areas()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_invalid_predictor_settings_rejected() {
    let config = EngineConfig::from_toml_str("[predictor]\nsafety_buffer = -2.0").unwrap();
    let err = DistributionPlanner::new(config, demo_areas()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
