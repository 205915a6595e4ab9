//! 2D coordinates.

use std::fmt;

use super::ensure_finite;
use crate::error::Result;

/// A location in the 2D plane.
///
/// # Examples
///
/// ```
/// use reliefroute_core::Point;
///
/// let depot = Point::new(0.0, 0.0);
/// assert_eq!(depot.distance_to(&Point::new(3.0, 4.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point without validation.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Creates a point, rejecting non-finite coordinates.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        Ok(Point {
            x: ensure_finite("x", x)?,
            y: ensure_finite("y", y)?,
        })
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
