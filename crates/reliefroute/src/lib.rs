//! ReliefRoute - Food Distribution Planning in Rust
//!
//! Predicts per-area demand, splits available stock by vulnerability and
//! sequences deliveries from a depot.
//!
//! # Example
//!
//! ```rust
//! use reliefroute::prelude::*;
//!
//! let d = formula::distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)).unwrap();
//! assert_eq!(d, 5.0);
//!
//! let route = optimize_route(
//!     Point::ORIGIN,
//!     &[Point::new(10.0, 10.0), Point::new(1.0, 1.0), Point::new(5.0, 5.0)],
//! );
//! assert_eq!(route.deliveries()[0], Point::new(1.0, 1.0));
//! ```

// Domain types, errors and formulas
pub use reliefroute_core::{
    formula, Area, AreaId, CenterId, DistributionCenter, ErrorKind, InventorySnapshot, Point,
    ReliefError, Result,
};

// Configuration
pub use reliefroute_config::{
    AlertConfig, ConfigError, EngineConfig, EnvironmentMode, PredictorConfig,
};

// Planning components
pub use reliefroute_engine::{
    optimize_route, Alert, AlertKind, AlertMonitor, AlertStatus, AllocationResult, AreaProfile,
    AreaStatus, CenterStatus, DeliveryRecord, DemandPredictor, DistanceMeter, DistributionNetwork,
    EuclideanMeter, InventoryLedger, LinearModel, LoadOperation, LowStockItem, ResourceAllocator,
    Route, RouteOptimizer, StockOperation, StockSummary, TrainingReport, TrainingSet, Transaction,
};

mod planner;
pub use planner::{AreaPlan, DistributionPlan, DistributionPlanner};

/// Colored console output for planning events.
#[cfg(feature = "console")]
pub use reliefroute_console as console;

pub mod prelude {
    pub use super::{formula, Area, AreaId, InventorySnapshot, Point, ReliefError, Result};
    pub use super::{optimize_route, DemandPredictor, ResourceAllocator, RouteOptimizer};
    pub use super::{DistributionPlan, DistributionPlanner, EngineConfig, TrainingSet};
}
