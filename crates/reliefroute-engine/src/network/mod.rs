//! Registry of distribution centers and vulnerable areas.
//!
//! Holds the mutable side of the system: center loads and the delivery log.
//! Entries are kept in insertion order; lookups go through an id index.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use reliefroute_core::{Area, AreaId, CenterId, DistributionCenter, Point, ReliefError, Result};


/// Direction of a center load change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadOperation {
    Add,
    Remove,
}

/// One recorded delivery.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeliveryRecord {
    pub area_id: AreaId,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time view of an area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AreaStatus {
    pub id: AreaId,
    pub location: Point,
    pub population: u64,
    pub vulnerability_score: f64,
    pub last_delivery: Option<DateTime<Utc>>,
}

impl From<&Area> for AreaStatus {
    fn from(area: &Area) -> Self {
        AreaStatus {
            id: area.id().clone(),
            location: area.location(),
            population: area.population(),
            vulnerability_score: area.vulnerability_score(),
            last_delivery: area.last_delivery(),
        }
    }
}

/// Point-in-time view of a distribution center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CenterStatus {
    pub id: CenterId,
    pub location: Point,
    pub capacity: f64,
    pub current_load: f64,
    /// `current_load / capacity`.
    pub utilization: f64,
}

impl From<&DistributionCenter> for CenterStatus {
    fn from(center: &DistributionCenter) -> Self {
        CenterStatus {
            id: center.id().clone(),
            location: center.location(),
            capacity: center.capacity(),
            current_load: center.current_load(),
            utilization: center.utilization(),
        }
    }
}

/// Centers, areas and the delivery log of one distribution operation.
///
/// # Examples
///
/// ```
/// use reliefroute_core::{DistributionCenter, Point};
/// use reliefroute_engine::{DistributionNetwork, LoadOperation};
///
/// let mut network = DistributionNetwork::new();
/// network
///     .add_center(DistributionCenter::new("dc1", Point::new(0.0, 0.0), 5000.0).unwrap())
///     .unwrap();
///
/// network.update_center_load("dc1", 1250.0, LoadOperation::Add).unwrap();
/// assert_eq!(network.center_status("dc1").unwrap().utilization, 0.25);
///
/// assert!(network.update_center_load("dc1", 4000.0, LoadOperation::Add).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistributionNetwork {
    centers: Vec<DistributionCenter>,
    center_index: HashMap<CenterId, usize>,
    areas: Vec<Area>,
    area_index: HashMap<AreaId, usize>,
    deliveries: Vec<DeliveryRecord>,
}

impl DistributionNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a distribution center.
    pub fn add_center(&mut self, center: DistributionCenter) -> Result<()> {
        if self.center_index.contains_key(center.id()) {
            return Err(ReliefError::validation(format!(
                "distribution center {} is already registered",
                center.id()
            )));
        }
        self.center_index
            .insert(center.id().clone(), self.centers.len());
        self.centers.push(center);
        Ok(())
    }

    /// Registers a vulnerable area.
    pub fn add_area(&mut self, area: Area) -> Result<()> {
        if self.area_index.contains_key(area.id()) {
            return Err(ReliefError::validation(format!(
                "area {} is already registered",
                area.id()
            )));
        }
        self.area_index.insert(area.id().clone(), self.areas.len());
        self.areas.push(area);
        Ok(())
    }

    /// Centers in insertion order.
    pub fn centers(&self) -> &[DistributionCenter] {
        &self.centers
    }

    /// Areas in insertion order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn center(&self, id: &str) -> Option<&DistributionCenter> {
        self.center_index.get(id).map(|&i| &self.centers[i])
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.area_index.get(id).map(|&i| &self.areas[i])
    }

    /// Adds or removes load at a center.
    ///
    /// # Errors
    ///
    /// `UnknownCenter` for an unregistered id; `Validation` when adding
    /// would exceed capacity or removing more than is stored.
    pub fn update_center_load(
        &mut self,
        center_id: &str,
        quantity: f64,
        operation: LoadOperation,
    ) -> Result<()> {
        let index = *self
            .center_index
            .get(center_id)
            .ok_or_else(|| ReliefError::UnknownCenter(center_id.to_string()))?;
        let center = &mut self.centers[index];
        match operation {
            LoadOperation::Add => center.add_load(quantity)?,
            LoadOperation::Remove => center.remove_load(quantity)?,
        }
        debug!(
            event = "center_load",
            center = center_id,
            ?operation,
            quantity,
            load = center.current_load(),
        );
        Ok(())
    }

    /// Records a delivery and updates the area's last-delivery time.
    pub fn record_delivery(
        &mut self,
        area_id: &str,
        quantity: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let index = *self
            .area_index
            .get(area_id)
            .ok_or_else(|| ReliefError::UnknownArea(area_id.to_string()))?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ReliefError::validation(format!(
                "delivered quantity must be finite and non-negative, got {quantity}"
            )));
        }
        let area = &mut self.areas[index];
        area.set_last_delivery(timestamp);
        self.deliveries.push(DeliveryRecord {
            area_id: area.id().clone(),
            quantity,
            timestamp,
        });
        debug!(event = "delivery", area = area_id, quantity);
        Ok(())
    }

    /// Delivery log in recording order.
    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    /// Total quantity delivered to an area so far.
    pub fn delivered_to(&self, area_id: &str) -> f64 {
        self.deliveries
            .iter()
            .filter(|record| record.area_id.as_str() == area_id)
            .map(|record| record.quantity)
            .sum()
    }

    pub fn area_status(&self, area_id: &str) -> Result<AreaStatus> {
        self.area(area_id)
            .map(AreaStatus::from)
            .ok_or_else(|| ReliefError::UnknownArea(area_id.to_string()))
    }

    pub fn center_status(&self, center_id: &str) -> Result<CenterStatus> {
        self.center(center_id)
            .map(CenterStatus::from)
            .ok_or_else(|| ReliefError::UnknownCenter(center_id.to_string()))
    }
}
