//! One-shot planning over a fixed set of areas.
//!
//! The planner owns one of each component and runs them in sequence:
//! predict demand per area, allocate stock against that demand, then
//! sequence deliveries. Allocations are computed independently per area
//! against the same snapshot; nothing is deducted between areas.
//!
//! Logging levels:
//! - **INFO**: Plan start/end with totals
//! - **WARN**: Alerts raised while planning

use chrono::{DateTime, Utc};
use tracing::info;

use reliefroute_config::EngineConfig;
use reliefroute_core::{Area, AreaId, InventorySnapshot, Point, ReliefError, Result};
use reliefroute_engine::{
    Alert, AlertMonitor, AllocationResult, DemandPredictor, ResourceAllocator, Route,
    RouteOptimizer, TrainingReport, TrainingSet,
};

#[cfg(test)]
mod tests;

/// Prediction and allocation for one area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AreaPlan {
    pub area_id: AreaId,
    pub predicted_demand: f64,
    pub allocation: AllocationResult,
}

/// Result of [`DistributionPlanner::plan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistributionPlan {
    /// Per-area results, in area registration order.
    pub areas: Vec<AreaPlan>,
    /// Depot followed by area locations in visiting order.
    pub route: Route,
    /// Area ids in visiting order.
    pub visiting_order: Vec<AreaId>,
    /// Alerts raised while building this plan.
    pub alerts: Vec<Alert>,
    pub generated_at: DateTime<Utc>,
}

impl DistributionPlan {
    pub fn area(&self, area_id: &str) -> Option<&AreaPlan> {
        self.areas.iter().find(|plan| plan.area_id.as_str() == area_id)
    }

    /// Sum of per-item allocations over all areas.
    pub fn total_allocated(&self) -> f64 {
        self.areas
            .iter()
            .map(|plan| plan.allocation.total_allocated())
            .sum()
    }
}

/// Composition root for predictor, allocator, optimizer and alert monitor.
///
/// # Examples
///
/// ```
/// use reliefroute::{Area, DistributionPlanner, EngineConfig, InventorySnapshot, Point, TrainingSet};
///
/// let areas = vec![
///     Area::new("north", Point::new(1.0, 2.0), 1000, 8.0).unwrap(),
///     Area::new("south", Point::new(4.0, -1.0), 2000, 5.0).unwrap(),
/// ];
/// let mut planner = DistributionPlanner::new(EngineConfig::new().with_random_seed(1), areas).unwrap();
///
/// let history = TrainingSet::from_histories([
///     ("north", vec![90.0, 100.0]),
///     ("south", vec![180.0, 200.0]),
/// ]);
/// planner.train(&history, &[vec![1.0, 20.0], vec![2.0, 22.0]]).unwrap();
///
/// let inventory = InventorySnapshot::from_items([("rice", 500.0), ("beans", 300.0)]).unwrap();
/// let plan = planner
///     .plan(Point::ORIGIN, &[vec![3.0, 21.0], vec![3.0, 21.0]], &inventory)
///     .unwrap();
///
/// assert_eq!(plan.areas.len(), 2);
/// assert_eq!(plan.route.stop_count(), 3);
/// ```
#[derive(Debug)]
pub struct DistributionPlanner {
    config: EngineConfig,
    areas: Vec<Area>,
    predictor: DemandPredictor,
    allocator: ResourceAllocator,
    optimizer: RouteOptimizer,
    monitor: AlertMonitor,
    history: Option<TrainingSet>,
}

impl DistributionPlanner {
    /// Creates a planner for `areas`.
    ///
    /// # Errors
    ///
    /// `Validation` for an invalid configuration or duplicate area ids.
    pub fn new(config: EngineConfig, areas: Vec<Area>) -> Result<Self> {
        config
            .validate()
            .map_err(|err| ReliefError::validation(err.to_string()))?;
        let allocator = ResourceAllocator::new(&areas)?;
        Ok(Self {
            predictor: DemandPredictor::from_config(&config)?,
            monitor: AlertMonitor::from_config(&config),
            optimizer: RouteOptimizer::new(),
            allocator,
            areas,
            config,
            history: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Areas in registration order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn predictor(&self) -> &DemandPredictor {
        &self.predictor
    }

    /// Every alert raised by this planner so far.
    pub fn monitor(&self) -> &AlertMonitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut AlertMonitor {
        &mut self.monitor
    }

    /// Trains the demand predictor and keeps `history` for spike checks.
    pub fn train(
        &mut self,
        history: &TrainingSet,
        features: &[Vec<f64>],
    ) -> Result<TrainingReport> {
        let report = self.predictor.train(history, features)?;
        self.history = Some(history.clone());
        Ok(report)
    }

    /// Builds a plan.
    ///
    /// `forecast[i]` is the feature vector for the i-th area. Low-stock
    /// alerts are checked against `inventory`; an area whose prediction
    /// exceeds its historical mean by the configured ratio raises a
    /// demand-spike alert.
    ///
    /// # Errors
    ///
    /// `NotReady` before [`train`](Self::train); `Validation` when the
    /// forecast count differs from the area count; any prediction or
    /// allocation error.
    pub fn plan(
        &mut self,
        depot: Point,
        forecast: &[Vec<f64>],
        inventory: &InventorySnapshot,
    ) -> Result<DistributionPlan> {
        if !self.predictor.is_trained() {
            return Err(ReliefError::NotReady);
        }
        if forecast.len() != self.areas.len() {
            return Err(ReliefError::validation(format!(
                "expected {} forecast vectors, one per area, got {}",
                self.areas.len(),
                forecast.len()
            )));
        }
        let depot = Point::try_new(depot.x, depot.y)?;

        info!(
            event = "plan_start",
            areas = self.areas.len() as u64,
            items = inventory.len() as u64,
            total_stock = inventory.total(),
        );

        // Predict everything before touching the monitor so a failure raises nothing.
        let predictions = forecast
            .iter()
            .map(|features| self.predictor.predict(features))
            .collect::<Result<Vec<f64>>>()?;

        let mut areas = Vec::with_capacity(self.areas.len());
        for (area, &predicted_demand) in self.areas.iter().zip(&predictions) {
            let allocation = self
                .allocator
                .allocate(area.id().as_str(), predicted_demand, inventory)?;
            areas.push(AreaPlan {
                area_id: area.id().clone(),
                predicted_demand,
                allocation,
            });
        }

        let first_alert = self.monitor.alerts().len();
        self.monitor.check_inventory_levels(inventory);
        if let Some(history) = &self.history {
            for plan in &areas {
                if let Some(mean) = history.history(plan.area_id.as_str()).and_then(mean) {
                    self.monitor
                        .check_demand_spike(plan.area_id.as_str(), plan.predicted_demand, mean);
                }
            }
        }
        let alerts = self.monitor.alerts()[first_alert..].to_vec();

        let (route, visiting_order) = self.optimizer.route_areas(depot, &self.areas);

        let plan = DistributionPlan {
            areas,
            route,
            visiting_order,
            alerts,
            generated_at: Utc::now(),
        };

        info!(
            event = "plan_end",
            areas = plan.areas.len() as u64,
            allocated = plan.total_allocated(),
            distance = plan.route.total_distance(),
            alerts = plan.alerts.len() as u64,
        );
        Ok(plan)
    }

    /// Same as [`plan`](Self::plan) with one feature vector shared by every area.
    pub fn plan_uniform(
        &mut self,
        depot: Point,
        features: &[f64],
        inventory: &InventorySnapshot,
    ) -> Result<DistributionPlan> {
        let forecast = vec![features.to_vec(); self.areas.len()];
        self.plan(depot, &forecast, inventory)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
