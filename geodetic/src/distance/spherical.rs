use crate::distance::{ensure_same_ellipsoid, round_to_mm, DistanceCalculator};
use crate::error::GeodeticError;
use crate::geo::{Coordinate, GeoPoint};

/// Great-circle distance by the spherical law of cosines on the mean sphere of the ellipsoid.
///
/// Results are rounded to millimeters. Both coordinates must be defined on the same ellipsoid.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SphericalCosines;

impl DistanceCalculator for SphericalCosines {
    fn distance(&self, point1: &Coordinate, point2: &Coordinate) -> Result<f64, GeodeticError> {
        ensure_same_ellipsoid(point1, point2)?;

        // acos is badly conditioned near 1, rounding alone would give a few centimeters here.
        if point1.lat() == point2.lat() && point1.lng() == point2.lng() {
            return Ok(0.0);
        }

        let radius = point1.ellipsoid().arithmetic_mean_radius();
        let (lat1, lat2) = (point1.lat_rad(), point2.lat_rad());
        let delta_lng = point2.lng_rad() - point1.lng_rad();

        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos();

        Ok(round_to_mm(cos_angle.clamp(-1.0, 1.0).acos() * radius))
    }
}

/// Great-circle distance by the haversine formula on the mean sphere of the ellipsoid.
///
/// Unlike [`SphericalCosines`] it is well conditioned for very short distances. Results are rounded to millimeters.
/// Both coordinates must be defined on the same ellipsoid.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Haversine;

impl DistanceCalculator for Haversine {
    fn distance(&self, point1: &Coordinate, point2: &Coordinate) -> Result<f64, GeodeticError> {
        ensure_same_ellipsoid(point1, point2)?;

        let radius = point1.ellipsoid().arithmetic_mean_radius();
        let (lat1, lat2) = (point1.lat_rad(), point2.lat_rad());
        let half_delta_lat = (lat2 - lat1) / 2.0;
        let half_delta_lng = (point2.lng_rad() - point1.lng_rad()) / 2.0;

        let h = half_delta_lat.sin().powi(2) + lat1.cos() * lat2.cos() * half_delta_lng.sin().powi(2);

        Ok(round_to_mm(2.0 * radius * h.clamp(0.0, 1.0).sqrt().asin()))
    }
}
