//! Polyline is an ordered sequence of coordinates connected by geodesic [`Line`] segments.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distance::DistanceCalculator;
use crate::error::GeodeticError;
use crate::geo::Coordinate;
use crate::line::Line;
use crate::simplify::Simplify;

/// Open sequence of points. Segments are not stored, they are derived from consecutive pairs of points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates an empty polyline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the end of the polyline.
    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    /// Points of the polyline.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline returning its points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the segments between consecutive points. A polyline with `n > 1` points has `n - 1`
    /// segments, with less than two points it has none.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points
            .windows(2)
            .map(|pair| Line::new(pair[0].clone(), pair[1].clone()))
    }

    /// Sum of the lengths of all segments, measured by the given calculator.
    pub fn length(
        &self,
        calculator: &(impl DistanceCalculator + ?Sized),
    ) -> Result<f64, GeodeticError> {
        self.points
            .windows(2)
            .map(|pair| calculator.distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Polyline with the same points in reversed order.
    pub fn reverse(&self) -> Self {
        self.points.iter().rev().cloned().collect()
    }

    /// Returns a simplified copy of the polyline.
    pub fn simplify(&self, simplifier: &(impl Simplify + ?Sized)) -> Self {
        simplifier.simplify(self)
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coordinate> for Polyline {
    fn extend<T: IntoIterator<Item = Coordinate>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}
