use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::geo::{Coordinate, GeoPoint};
use crate::line::Line;

/// Distance from a point to the great circle through the points of a line, measured on the mean sphere of the
/// point's ellipsoid.
///
/// The distance is to the whole great circle, not only to the segment between the line points. If the line points
/// coincide (or are antipodal) the great circle is undefined and the distance to the first line point is returned.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PerpendicularDistance;

impl PerpendicularDistance {
    /// Perpendicular distance in meters.
    pub fn distance(&self, point: &Coordinate, line: &Line) -> f64 {
        self.distance_to_chord(point, line.point1(), line.point2())
    }

    pub(crate) fn distance_to_chord(
        &self,
        point: &Coordinate,
        start: &Coordinate,
        end: &Coordinate,
    ) -> f64 {
        let radius = point.ellipsoid().arithmetic_mean_radius();

        let start = sphere_position(start, radius);
        let end = sphere_position(end, radius);
        let point = sphere_position(point, radius);

        let angle = match start.cross(&end).try_normalize(f64::MIN_POSITIVE) {
            Some(normal) => {
                let cos_theta = normal.dot(&point) / point.norm();
                (FRAC_PI_2 - cos_theta.clamp(-1.0, 1.0).acos()).abs()
            }
            None => start.angle(&point),
        };

        angle * radius
    }
}

/// Position on a sphere from colatitude and longitude in `(0, 360]` range.
fn sphere_position(coordinate: &Coordinate, radius: f64) -> Vector3<f64> {
    let colatitude = (90.0 - coordinate.lat()).to_radians();
    let lng = coordinate.lng();
    let lng = if lng > 0.0 { lng } else { lng + 360.0 }.to_radians();

    let (sin_colat, cos_colat) = colatitude.sin_cos();
    Vector3::new(
        radius * lng.cos() * sin_colat,
        radius * lng.sin() * sin_colat,
        radius * cos_colat,
    )
}
