//! Formula library shared by every planning component.
//!
//! All functions are pure. Inputs must be finite; a non-finite input, a zero
//! denominator or a non-finite result yields [`ReliefError::Domain`] instead of
//! a silent NaN or infinity.
//!
//! Weights are fixed constants.
//!
//! # Examples
//!
//! ```
//! use reliefroute_core::formula;
//! use reliefroute_core::Point;
//!
//! let d = formula::distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)).unwrap();
//! assert_eq!(d, 5.0);
//!
//! let demand = formula::demand(100.0, 2000, 5.0, 1.0).unwrap();
//! assert_eq!(demand, 300.0);
//!
//! assert!(formula::efficiency(10.0, 0.0, 1.0, 1.0).is_err());
//! ```

use crate::domain::Point;
use crate::error::{ReliefError, Result};


/// Population is expressed per this many people in [`demand`].
pub const POPULATION_UNIT: f64 = 1000.0;

/// Vulnerability scores are divided by this scale (scores run 0 to 10).
pub const VULNERABILITY_SCALE: f64 = 10.0;

/// Share of the covered population assumed reachable in [`coverage`].
pub const COVERAGE_ACCESSIBILITY: f64 = 0.8;

/// Days after which the delivery factor of [`priority`] saturates.
pub const PRIORITY_DAYS_WINDOW: f64 = 7.0;

/// Inventory level at which the stock factor of [`priority`] reaches zero.
pub const PRIORITY_INVENTORY_REFERENCE: f64 = 1000.0;

/// Population at which the population factor of [`vulnerability_index`] saturates.
pub const VULNERABILITY_POPULATION_REFERENCE: f64 = 10_000.0;

/// Predicted demand = base × population factor × vulnerability factor × seasonality.
pub fn demand(base: f64, population: u64, vulnerability: f64, seasonality: f64) -> Result<f64> {
    let base = finite("base", base)?;
    let vulnerability = finite("vulnerability", vulnerability)?;
    let seasonality = finite("seasonality", seasonality)?;

    let population_factor = population as f64 / POPULATION_UNIT;
    finish(
        "demand",
        base * population_factor * vulnerability_factor(vulnerability) * seasonality,
    )
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> Result<f64> {
    finite("p1.x", p1.x)?;
    finite("p1.y", p1.y)?;
    finite("p2.x", p2.x)?;
    finite("p2.y", p2.y)?;
    finish("distance", p1.distance_to(&p2))
}

/// Allocation = required × priority multiplier × availability factor.
///
/// The availability factor is `min(1, available / required)`, taken as 1 when
/// nothing is required.
pub fn allocation(required: f64, vulnerability: f64, available: f64) -> Result<f64> {
    let required = finite("required", required)?;
    let vulnerability = finite("vulnerability", vulnerability)?;
    let available = finite("available", available)?;

    let availability_factor = if required == 0.0 {
        1.0
    } else {
        (available / required).min(1.0)
    };
    finish(
        "allocation",
        required * vulnerability_factor(vulnerability) * availability_factor,
    )
}

/// Efficiency = 0.6 × quantity factor + 0.4 × time factor, each capped at 1.
pub fn efficiency(
    delivered: f64,
    target: f64,
    delivery_time: f64,
    target_time: f64,
) -> Result<f64> {
    let delivered = finite("delivered", delivered)?;
    let target = nonzero("target", target)?;
    let delivery_time = nonzero("delivery_time", delivery_time)?;
    let target_time = finite("target_time", target_time)?;

    let quantity_factor = (delivered / target).min(1.0);
    let time_factor = (target_time / delivery_time).min(1.0);
    finish("efficiency", quantity_factor * 0.6 + time_factor * 0.4)
}

/// Priority = 0.4 × vulnerability weight + 0.3 × days factor + 0.3 × inventory factor.
///
/// The inventory factor `1 - inventory / 1000` turns negative above 1000
/// units, so the score is not bounded; use [`priority_clamped`] for a value
/// in `[0, 1]`.
pub fn priority(
    vulnerability: f64,
    days_since_delivery: f64,
    current_inventory: f64,
) -> Result<f64> {
    let vulnerability = finite("vulnerability", vulnerability)?;
    let days_since_delivery = finite("days_since_delivery", days_since_delivery)?;
    let current_inventory = finite("current_inventory", current_inventory)?;

    let vulnerability_weight = vulnerability / VULNERABILITY_SCALE;
    let days_factor = (days_since_delivery / PRIORITY_DAYS_WINDOW).min(1.0);
    let inventory_factor = 1.0 - current_inventory / PRIORITY_INVENTORY_REFERENCE;
    finish(
        "priority",
        vulnerability_weight * 0.4 + days_factor * 0.3 + inventory_factor * 0.3,
    )
}

/// [`priority`] clamped to `[0, 1]`.
pub fn priority_clamped(
    vulnerability: f64,
    days_since_delivery: f64,
    current_inventory: f64,
) -> Result<f64> {
    priority(vulnerability, days_since_delivery, current_inventory).map(|p| p.clamp(0.0, 1.0))
}

/// Covered population = π × radius² × density × accessibility.
pub fn coverage(radius: f64, population_density: f64) -> Result<f64> {
    let radius = finite("radius", radius)?;
    let population_density = finite("population_density", population_density)?;

    let area = std::f64::consts::PI * radius * radius;
    finish("coverage", area * population_density * COVERAGE_ACCESSIBILITY)
}

/// Response time = travel time + loading time + distribution time.
///
/// Distribution time is half the loading time.
pub fn response_time(distance: f64, average_speed: f64, loading_time: f64) -> Result<f64> {
    let distance = finite("distance", distance)?;
    let average_speed = nonzero("average_speed", average_speed)?;
    let loading_time = finite("loading_time", loading_time)?;

    let travel_time = distance / average_speed;
    let distribution_time = loading_time * 0.5;
    finish("response_time", travel_time + loading_time + distribution_time)
}

/// Success rate = 0.7 × delivery success + 0.3 × on-time factor.
///
/// Delivery success divides by at least one delivery.
pub fn success_rate(successful: u64, total: u64, on_time_factor: f64) -> Result<f64> {
    let on_time_factor = finite("on_time_factor", on_time_factor)?;

    let delivery_success = successful as f64 / total.max(1) as f64;
    finish("success_rate", delivery_success * 0.7 + on_time_factor * 0.3)
}

/// Vulnerability index = 0.3 × population + 0.2 × infrastructure
/// + 0.3 × food security + 0.2 × accessibility.
pub fn vulnerability_index(
    population: u64,
    infrastructure_score: f64,
    food_security_score: f64,
    accessibility_score: f64,
) -> Result<f64> {
    let infrastructure_score = finite("infrastructure_score", infrastructure_score)?;
    let food_security_score = finite("food_security_score", food_security_score)?;
    let accessibility_score = finite("accessibility_score", accessibility_score)?;

    let population_factor = (population as f64 / VULNERABILITY_POPULATION_REFERENCE).min(1.0);
    finish(
        "vulnerability_index",
        population_factor * 0.3
            + infrastructure_score * 0.2
            + food_security_score * 0.3
            + accessibility_score * 0.2,
    )
}

/// Distribution score = 0.4 × delivery success + 0.2 × coverage rate
/// + 0.2 × response time factor + 0.2 × efficiency.
pub fn distribution_score(
    delivery_success: f64,
    coverage_rate: f64,
    response_time_factor: f64,
    efficiency_score: f64,
) -> Result<f64> {
    let delivery_success = finite("delivery_success", delivery_success)?;
    let coverage_rate = finite("coverage_rate", coverage_rate)?;
    let response_time_factor = finite("response_time_factor", response_time_factor)?;
    let efficiency_score = finite("efficiency_score", efficiency_score)?;

    finish(
        "distribution_score",
        delivery_success * 0.4
            + coverage_rate * 0.2
            + response_time_factor * 0.2
            + efficiency_score * 0.2,
    )
}

/// Priority multiplier for a vulnerability score: `1 + vulnerability / 10`.
///
/// Shared by [`demand`], [`allocation`], the area model and the allocator.
#[inline]
pub fn vulnerability_factor(vulnerability: f64) -> f64 {
    1.0 + vulnerability / VULNERABILITY_SCALE
}

#[inline]
fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReliefError::Domain(format!("{name} must be finite, got {value}")))
    }
}

#[inline]
fn nonzero(name: &str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value == 0.0 {
        return Err(ReliefError::Domain(format!("{name} must be non-zero")));
    }
    Ok(value)
}

#[inline]
fn finish(formula: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReliefError::Domain(format!(
            "{formula} produced a non-finite result"
        )))
    }
}
