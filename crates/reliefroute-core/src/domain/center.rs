//! Distribution centers.

use super::{ensure_finite, CenterId, Point};
use crate::error::{ReliefError, Result};

/// A depot that stores food up to a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistributionCenter {
    id: CenterId,
    location: Point,
    capacity: f64,
    current_load: f64,
}

impl DistributionCenter {
    /// Creates an empty center. Capacity must be finite and positive.
    pub fn new(id: impl Into<CenterId>, location: Point, capacity: f64) -> Result<Self> {
        let id = id.into();
        if id.as_str().is_empty() {
            return Err(ReliefError::validation("center id must not be empty"));
        }
        let location = Point::try_new(location.x, location.y)?;
        let capacity = ensure_finite("capacity", capacity)?;
        if capacity <= 0.0 {
            return Err(ReliefError::validation(format!(
                "capacity of center {id} must be positive, got {capacity}"
            )));
        }
        Ok(DistributionCenter {
            id,
            location,
            capacity,
            current_load: 0.0,
        })
    }

    pub fn id(&self) -> &CenterId {
        &self.id
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn current_load(&self) -> f64 {
        self.current_load
    }

    /// Fraction of capacity in use.
    pub fn utilization(&self) -> f64 {
        self.current_load / self.capacity
    }

    /// Adds load, failing if the result would exceed capacity.
    pub fn add_load(&mut self, quantity: f64) -> Result<()> {
        let quantity = check_quantity(quantity)?;
        if self.current_load + quantity > self.capacity {
            return Err(ReliefError::validation(format!(
                "Exceeds capacity of distribution center {}",
                self.id
            )));
        }
        self.current_load += quantity;
        Ok(())
    }

    /// Removes load, failing if less than `quantity` is stored.
    pub fn remove_load(&mut self, quantity: f64) -> Result<()> {
        let quantity = check_quantity(quantity)?;
        if self.current_load < quantity {
            return Err(ReliefError::validation(format!(
                "Insufficient load in distribution center {}",
                self.id
            )));
        }
        self.current_load -= quantity;
        Ok(())
    }
}

fn check_quantity(quantity: f64) -> Result<f64> {
    let quantity = ensure_finite("quantity", quantity)?;
    if quantity < 0.0 {
        return Err(ReliefError::validation(format!(
            "quantity must be non-negative, got {quantity}"
        )));
    }
    Ok(quantity)
}
