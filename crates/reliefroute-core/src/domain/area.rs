//! Vulnerable areas.

use chrono::{DateTime, Utc};

use super::{ensure_finite, AreaId, Point};
use crate::error::{ReliefError, Result};
use crate::formula;

/// A vulnerable area that receives food deliveries.
///
/// Constructed through [`Area::new`], which enforces a finite location and a
/// finite, non-negative vulnerability score (conventionally 0 to 10).
///
/// # Examples
///
/// ```
/// use reliefroute_core::{Area, Point};
///
/// let area = Area::new("area1", Point::new(2.0, 3.0), 1000, 8.5).unwrap();
/// assert_eq!(area.id().as_str(), "area1");
/// assert_eq!(area.priority_multiplier(), 1.85);
/// assert!(area.last_delivery().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Area {
    id: AreaId,
    location: Point,
    population: u64,
    vulnerability_score: f64,
    last_delivery: Option<DateTime<Utc>>,
}

impl Area {
    /// Creates a validated area with no recorded delivery.
    pub fn new(
        id: impl Into<AreaId>,
        location: Point,
        population: u64,
        vulnerability_score: f64,
    ) -> Result<Self> {
        let id = id.into();
        if id.as_str().is_empty() {
            return Err(ReliefError::validation("area id must not be empty"));
        }
        let location = Point::try_new(location.x, location.y)?;
        let vulnerability_score = ensure_finite("vulnerability_score", vulnerability_score)?;
        if vulnerability_score < 0.0 {
            return Err(ReliefError::validation(format!(
                "vulnerability score of area {id} must be non-negative, got {vulnerability_score}"
            )));
        }
        Ok(Area {
            id,
            location,
            population,
            vulnerability_score,
            last_delivery: None,
        })
    }

    /// Sets the last delivery timestamp.
    pub fn with_last_delivery(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_delivery = Some(timestamp);
        self
    }

    pub fn id(&self) -> &AreaId {
        &self.id
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn vulnerability_score(&self) -> f64 {
        self.vulnerability_score
    }

    pub fn last_delivery(&self) -> Option<DateTime<Utc>> {
        self.last_delivery
    }

    /// Records a delivery at the given time.
    pub fn set_last_delivery(&mut self, timestamp: DateTime<Utc>) {
        self.last_delivery = Some(timestamp);
    }

    /// Priority multiplier applied to demand, see [`formula::vulnerability_factor`].
    #[inline]
    pub fn priority_multiplier(&self) -> f64 {
        formula::vulnerability_factor(self.vulnerability_score)
    }

    /// Whole days elapsed since the last delivery, or `None` if never served.
    pub fn days_since_delivery(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_delivery
            .map(|last| now.signed_duration_since(last).num_days().max(0))
    }
}
