//! Domain model for distribution planning
//!
//! These types replace loosely-typed records with validated values:
//! - `Point`: a location in the 2D plane
//! - `Area`: a vulnerable area receiving deliveries
//! - `DistributionCenter`: a depot with a load capacity
//! - `InventorySnapshot`: available stock per food item

mod area;
mod center;
mod ids;
mod inventory;
mod point;


pub use area::Area;
pub use center::DistributionCenter;
pub use ids::{AreaId, CenterId};
pub use inventory::InventorySnapshot;
pub use point::Point;

use crate::error::{ReliefError, Result};

// Rejects NaN and infinities with a message naming the offending field.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReliefError::Domain(format!("{field} must be finite, got {value}")))
    }
}
