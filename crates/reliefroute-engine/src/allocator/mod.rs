//! Priority-weighted proportional allocation of stock to one area.
//!
//! The allocator scales a required quantity by the area's priority multiplier,
//! caps it at the stock on hand, and splits it across food items in
//! proportion to their availability. No item is ever allocated beyond its
//! available quantity.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use reliefroute_core::{formula, Area, AreaId, InventorySnapshot, ReliefError, Result};


/// Area metadata the allocator reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaProfile {
    pub vulnerability_score: f64,
    pub population: u64,
}

impl AreaProfile {
    /// Priority multiplier: `1 + vulnerability / 10`.
    #[inline]
    pub fn priority_multiplier(&self) -> f64 {
        formula::vulnerability_factor(self.vulnerability_score)
    }
}

impl From<&Area> for AreaProfile {
    fn from(area: &Area) -> Self {
        Self {
            vulnerability_score: area.vulnerability_score(),
            population: area.population(),
        }
    }
}

/// Outcome of one allocation call.
///
/// `total_allocated() <= adjusted_quantity <= inventory total`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllocationResult {
    pub area_id: AreaId,
    /// The requested quantity as given.
    pub base_quantity: f64,
    /// Requested quantity after the priority multiplier and the stock cap.
    pub adjusted_quantity: f64,
    pub vulnerability_score: f64,
    pub population: u64,
    /// Allocated quantity per food item.
    pub food_allocation: BTreeMap<String, f64>,
}

impl AllocationResult {
    /// Sum of the per-item allocations.
    pub fn total_allocated(&self) -> f64 {
        self.food_allocation.values().sum()
    }
}

/// Splits available inventory for an area according to its vulnerability.
///
/// The area registry is fixed at construction; build a new allocator to
/// change it.
///
/// # Examples
///
/// ```
/// use reliefroute_core::{Area, InventorySnapshot, Point};
/// use reliefroute_engine::ResourceAllocator;
///
/// let areas = [Area::new("area1", Point::new(2.0, 3.0), 1000, 8.5).unwrap()];
/// let allocator = ResourceAllocator::new(&areas).unwrap();
///
/// let stock = InventorySnapshot::from_items([("rice", 1000.0), ("beans", 800.0)]).unwrap();
/// let result = allocator.allocate("area1", 100.0, &stock).unwrap();
///
/// assert!((result.adjusted_quantity - 185.0).abs() < 1e-9);
/// assert!(allocator.allocate("nowhere", 100.0, &stock).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceAllocator {
    areas: HashMap<AreaId, AreaProfile>,
}

impl ResourceAllocator {
    /// Creates an allocator over the given areas.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an area id appears twice.
    pub fn new<'a>(areas: impl IntoIterator<Item = &'a Area>) -> Result<Self> {
        let mut registry = HashMap::new();
        for area in areas {
            if registry
                .insert(area.id().clone(), AreaProfile::from(area))
                .is_some()
            {
                return Err(ReliefError::validation(format!(
                    "duplicate area {}",
                    area.id()
                )));
            }
        }
        Ok(Self { areas: registry })
    }

    /// Returns the profile of a registered area.
    pub fn profile(&self, area_id: &str) -> Option<&AreaProfile> {
        self.areas.get(area_id)
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Allocates stock for one area.
    ///
    /// The inventory is only read.
    ///
    /// # Errors
    ///
    /// `UnknownArea` for unregistered ids; a validation error for a negative
    /// or non-finite `required_quantity`.
    pub fn allocate(
        &self,
        area_id: &str,
        required_quantity: f64,
        inventory: &InventorySnapshot,
    ) -> Result<AllocationResult> {
        let (id, profile) = self
            .areas
            .get_key_value(area_id)
            .ok_or_else(|| ReliefError::UnknownArea(area_id.to_string()))?;
        if !required_quantity.is_finite() || required_quantity < 0.0 {
            return Err(ReliefError::validation(format!(
                "required quantity must be finite and non-negative, got {required_quantity}"
            )));
        }

        let total_available = inventory.total();
        let adjusted_quantity =
            (required_quantity * profile.priority_multiplier()).min(total_available);

        let mut food_allocation: BTreeMap<String, f64> = inventory
            .iter()
            .map(|(item, quantity)| {
                let proportion = if total_available > 0.0 {
                    quantity / total_available
                } else {
                    0.0
                };
                (item.to_string(), quantity.min(adjusted_quantity * proportion))
            })
            .collect();
        trim_rounding_excess(&mut food_allocation, adjusted_quantity);

        info!(
            event = "allocation",
            area = %id,
            base = required_quantity,
            adjusted = adjusted_quantity,
            items = food_allocation.len() as u64,
        );

        Ok(AllocationResult {
            area_id: id.clone(),
            base_quantity: required_quantity,
            adjusted_quantity,
            vulnerability_score: profile.vulnerability_score,
            population: profile.population,
            food_allocation,
        })
    }
}

// Proportional shares can sum a few ulps past the target. The excess comes off
// the largest share; nothing is redistributed upward.
fn trim_rounding_excess(allocation: &mut BTreeMap<String, f64>, target: f64) {
    let excess = allocation.values().sum::<f64>() - target;
    if excess <= 0.0 {
        return;
    }
    if let Some(largest) = allocation.values_mut().max_by(|a, b| a.total_cmp(b)) {
        *largest = (*largest - excess).max(0.0);
    }
}
