//! The three-area demo scenario.
//!
//! Two distribution centers, three vulnerable areas, five food items and a
//! week of demand history per area.
//!
//! # Example
//!
//! ```
//! use reliefroute_test::scenario::{demo_areas, demo_history, demo_training_features};
//!
//! assert_eq!(demo_areas().len(), 3);
//! assert_eq!(demo_history().len(), demo_training_features().len());
//! ```

use reliefroute_core::{Area, DistributionCenter, InventorySnapshot, Point};

/// Areas `area1`..`area3` with their locations, populations and scores.
pub fn demo_areas() -> Vec<Area> {
    [
        ("area1", (2.0, 3.0), 1000, 8.5),
        ("area2", (5.0, 4.0), 1500, 6.2),
        ("area3", (3.0, 7.0), 800, 9.1),
    ]
    .into_iter()
    .map(|(id, (x, y), population, score)| {
        Area::new(id, Point::new(x, y), population, score).expect("valid fixture area")
    })
    .collect()
}

/// Centers `dc1` at the origin and `dc2` at (10, 10).
pub fn demo_centers() -> Vec<DistributionCenter> {
    vec![
        DistributionCenter::new("dc1", Point::new(0.0, 0.0), 5000.0).expect("valid fixture center"),
        DistributionCenter::new("dc2", Point::new(10.0, 10.0), 3000.0)
            .expect("valid fixture center"),
    ]
}

/// Rice, beans, oil, flour and sugar stock.
pub fn demo_inventory() -> InventorySnapshot {
    InventorySnapshot::from_items([
        ("rice", 1000.0),
        ("beans", 800.0),
        ("oil", 500.0),
        ("flour", 600.0),
        ("sugar", 400.0),
    ])
    .expect("valid fixture inventory")
}

/// Seven observations per area.
pub fn demo_history() -> Vec<(&'static str, Vec<f64>)> {
    vec![
        ("area1", vec![100.0, 120.0, 95.0, 105.0, 115.0, 98.0, 102.0]),
        ("area2", vec![150.0, 160.0, 140.0, 155.0, 165.0, 145.0, 158.0]),
        ("area3", vec![80.0, 85.0, 75.0, 82.0, 88.0, 79.0, 83.0]),
    ]
}

/// Seven `[day, temperature]` feature rows.
pub fn demo_features() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 25.0],
        vec![2.0, 26.0],
        vec![3.0, 24.0],
        vec![4.0, 25.0],
        vec![5.0, 27.0],
        vec![6.0, 23.0],
        vec![7.0, 24.0],
    ]
}

/// One feature row per demo area, matching the row count of [`demo_history`].
pub fn demo_training_features() -> Vec<Vec<f64>> {
    demo_features().into_iter().take(demo_history().len()).collect()
}
