//! Delivery sequencing with the nearest-neighbor heuristic.
//!
//! Starting from the depot, the optimizer repeatedly visits the closest
//! unvisited point. This runs in O(n²) with no optimality guarantee, no
//! backtracking and no revisits.
//!
//! Ties are broken by input order: among equally distant candidates the one
//! that appears first in the input is visited first.

use std::fmt::Debug;

use tracing::info;

use reliefroute_core::{Area, AreaId, Point};

#[cfg(test)]
mod tests;

/// Measures travel cost between two points.
///
/// Implementations should be stateless and return a value >= 0.0.
///
/// # Example
///
/// ```
/// use reliefroute_core::Point;
/// use reliefroute_engine::DistanceMeter;
///
/// #[derive(Debug)]
/// struct ManhattanMeter;
///
/// impl DistanceMeter for ManhattanMeter {
///     fn distance(&self, from: &Point, to: &Point) -> f64 {
///         (from.x - to.x).abs() + (from.y - to.y).abs()
///     }
/// }
///
/// assert_eq!(ManhattanMeter.distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0)), 7.0);
/// ```
pub trait DistanceMeter: Send + Sync + Debug {
    fn distance(&self, from: &Point, to: &Point) -> f64;
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMeter;

impl DistanceMeter for EuclideanMeter {
    #[inline]
    fn distance(&self, from: &Point, to: &Point) -> f64 {
        from.distance_to(to)
    }
}

/// A visiting sequence: the depot followed by every delivery point once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    stops: Vec<Point>,
}

impl Route {
    /// The starting point.
    pub fn depot(&self) -> Point {
        self.stops[0]
    }

    /// All points in visiting order, depot first.
    pub fn stops(&self) -> &[Point] {
        &self.stops
    }

    /// Delivery points in visiting order, without the depot.
    pub fn deliveries(&self) -> &[Point] {
        &self.stops[1..]
    }

    /// Number of points including the depot.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn legs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.stops.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Euclidean length of the open path (no return to the depot).
    pub fn total_distance(&self) -> f64 {
        self.legs().map(|(from, to)| from.distance_to(&to)).sum()
    }

    pub fn into_stops(self) -> Vec<Point> {
        self.stops
    }
}

/// Orders delivery points greedily by distance.
///
/// # Examples
///
/// ```
/// use reliefroute_core::Point;
/// use reliefroute_engine::RouteOptimizer;
///
/// let route = RouteOptimizer::new().optimize_route(
///     Point::new(0.0, 0.0),
///     &[Point::new(10.0, 10.0), Point::new(1.0, 1.0), Point::new(5.0, 5.0)],
/// );
///
/// assert_eq!(
///     route.deliveries(),
///     &[Point::new(1.0, 1.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptimizer<M = EuclideanMeter> {
    meter: M,
}

impl RouteOptimizer<EuclideanMeter> {
    /// Creates an optimizer using Euclidean distance.
    pub fn new() -> Self {
        Self {
            meter: EuclideanMeter,
        }
    }
}

impl<M: DistanceMeter> RouteOptimizer<M> {
    /// Creates an optimizer with a custom distance meter.
    pub fn with_meter(meter: M) -> Self {
        Self { meter }
    }

    /// Builds a route from `start` through every point in `points`.
    ///
    /// The result has `points.len() + 1` entries and begins with `start`.
    pub fn optimize_route(&self, start: Point, points: &[Point]) -> Route {
        let order = self.visiting_order(start, points);
        build_route(start, points, &order)
    }

    /// Returns the visiting order of `areas` from the depot.
    pub fn sequence_areas(&self, depot: Point, areas: &[Area]) -> Vec<AreaId> {
        let locations: Vec<Point> = areas.iter().map(Area::location).collect();
        self.visiting_order(depot, &locations)
            .into_iter()
            .map(|i| areas[i].id().clone())
            .collect()
    }

    /// Builds the route through `areas` together with their ids in the same
    /// order, running the sequencing pass once.
    pub fn route_areas(&self, depot: Point, areas: &[Area]) -> (Route, Vec<AreaId>) {
        let locations: Vec<Point> = areas.iter().map(Area::location).collect();
        let order = self.visiting_order(depot, &locations);
        let ids = order.iter().map(|&i| areas[i].id().clone()).collect();
        (build_route(depot, &locations, &order), ids)
    }

    /// Indices into `points` in visiting order.
    pub fn visiting_order(&self, start: Point, points: &[Point]) -> Vec<usize> {
        let mut unvisited: Vec<usize> = (0..points.len()).collect();
        let mut order = Vec::with_capacity(points.len());
        let mut current = start;

        while !unvisited.is_empty() {
            let mut nearest_pos = 0;
            let mut nearest_distance = self.meter.distance(&current, &points[unvisited[0]]);
            for (pos, &candidate) in unvisited.iter().enumerate().skip(1) {
                let d = self.meter.distance(&current, &points[candidate]);
                // Strict comparison keeps the earliest candidate on ties.
                if d < nearest_distance {
                    nearest_pos = pos;
                    nearest_distance = d;
                }
            }
            let next = unvisited.remove(nearest_pos);
            current = points[next];
            order.push(next);
        }
        order
    }
}

fn build_route(start: Point, points: &[Point], order: &[usize]) -> Route {
    let mut stops = Vec::with_capacity(order.len() + 1);
    stops.push(start);
    stops.extend(order.iter().map(|&i| points[i]));

    info!(event = "route_built", stops = order.len() as u64);
    Route { stops }
}

/// Shorthand for [`RouteOptimizer::new`] followed by
/// [`optimize_route`](RouteOptimizer::optimize_route).
pub fn optimize_route(start: Point, points: &[Point]) -> Route {
    RouteOptimizer::new().optimize_route(start, points)
}
