//! Full planning runs over the demo network.

use reliefroute::{
    DistributionNetwork, DistributionPlanner, EngineConfig, EnvironmentMode, InventoryLedger,
    LoadOperation, Point, StockOperation, TrainingSet,
};
use reliefroute_test::{demo_areas, demo_centers, demo_history, demo_inventory, demo_training_features};

#[test]
fn reproducible_mode_plans_identically() {
    let run = || {
        let config = EngineConfig::new().with_environment_mode(EnvironmentMode::Reproducible);
        let mut planner = DistributionPlanner::new(config, demo_areas()).unwrap();
        planner
            .train(
                &TrainingSet::from_histories(demo_history()),
                &demo_training_features(),
            )
            .unwrap();
        planner
            .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &demo_inventory())
            .unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.areas, b.areas);
    assert_eq!(a.route, b.route);
    assert_eq!(a.visiting_order, b.visiting_order);
}

#[test]
fn ledger_feeds_planner_and_network_tracks_load() {
    let mut ledger = InventoryLedger::from_snapshot(&demo_inventory());
    ledger.update("oil", 450.0, StockOperation::Remove).unwrap();

    let mut planner =
        DistributionPlanner::new(EngineConfig::new().with_random_seed(5), demo_areas()).unwrap();
    planner
        .train(
            &TrainingSet::from_histories(demo_history()),
            &demo_training_features(),
        )
        .unwrap();
    let plan = planner
        .plan_uniform(Point::ORIGIN, &[1.0, 26.0], &ledger.snapshot().unwrap())
        .unwrap();

    // Oil fell to 50 units.
    assert!(plan.alerts.iter().any(|alert| alert.message.contains("oil")));

    let mut network = DistributionNetwork::new();
    for center in demo_centers() {
        network.add_center(center).unwrap();
    }
    for area in demo_areas() {
        network.add_area(area).unwrap();
    }

    let total = plan.total_allocated().min(5000.0);
    network
        .update_center_load("dc1", total, LoadOperation::Add)
        .unwrap();
    for area_plan in &plan.areas {
        network
            .record_delivery(
                area_plan.area_id.as_str(),
                area_plan.allocation.total_allocated(),
                plan.generated_at,
            )
            .unwrap();
    }

    assert_eq!(network.deliveries().len(), 3);
    assert!(network.center_status("dc1").unwrap().utilization <= 1.0);
    assert_eq!(
        network.area_status("area3").unwrap().last_delivery,
        Some(plan.generated_at)
    );
}
