//! Geodesic distance between two [`Coordinate`]s.
//!
//! Different calculators trade accuracy for speed:
//! * [`SphericalCosines`] and [`Haversine`] treat the Earth as a sphere with the mean radius of the ellipsoid. Good
//!   enough for most display purposes and fast.
//! * [`Vincenty`] solves the inverse geodesic problem on the ellipsoid and is accurate to fractions of a millimeter,
//!   but is iterative and fails for nearly antipodal points.

mod spherical;
mod vincenty;

pub use spherical::{Haversine, SphericalCosines};
pub use vincenty::Vincenty;

use crate::error::GeodeticError;
use crate::geo::Coordinate;

/// Strategy of measuring the distance between two coordinates.
pub trait DistanceCalculator {
    /// Distance between the two points in meters.
    ///
    /// The distance is symmetric and zero for equal points.
    fn distance(&self, point1: &Coordinate, point2: &Coordinate) -> Result<f64, GeodeticError>;
}

impl<T: DistanceCalculator + ?Sized> DistanceCalculator for Box<T> {
    fn distance(&self, point1: &Coordinate, point2: &Coordinate) -> Result<f64, GeodeticError> {
        (**self).distance(point1, point2)
    }
}

fn ensure_same_ellipsoid(point1: &Coordinate, point2: &Coordinate) -> Result<(), GeodeticError> {
    if point1.has_same_ellipsoid(point2) {
        Ok(())
    } else {
        Err(GeodeticError::MismatchedEllipsoid)
    }
}

/// Rounds meters to millimeters.
fn round_to_mm(meters: f64) -> f64 {
    (meters * 1000.0).round() / 1000.0
}
