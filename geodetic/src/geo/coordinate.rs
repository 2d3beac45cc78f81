use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cartesian::Cartesian;
use crate::distance::DistanceCalculator;
use crate::error::GeodeticError;
use crate::geo::ellipsoid::Ellipsoid;
use crate::geo::helmert::HelmertTransform;
use crate::geo::point::GeoPoint;

/// Validated geodetic point: latitude and longitude in degrees and height in whole meters above the
/// surface of a reference ellipsoid.
///
/// ```
/// use geodetic::geo::{Coordinate, GeoPoint};
///
/// let berlin = Coordinate::new(52.5, 13.4).unwrap();
/// assert_eq!(berlin.lat(), 52.5);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CoordinateParams"))]
pub struct Coordinate {
    lat: f64,
    lng: f64,
    height: f64,
    ellipsoid: Arc<Ellipsoid>,
}

impl Coordinate {
    /// Creates a new coordinate on the WGS-84 ellipsoid with zero height.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeodeticError> {
        Self::on_ellipsoid(lat, lng, 0.0, Ellipsoid::wgs84())
    }

    /// Creates a new coordinate on the WGS-84 ellipsoid. Height is rounded to the nearest meter.
    pub fn with_height(lat: f64, lng: f64, height: f64) -> Result<Self, GeodeticError> {
        Self::on_ellipsoid(lat, lng, height, Ellipsoid::wgs84())
    }

    /// Creates a new coordinate on the given ellipsoid. Height is rounded to the nearest meter.
    ///
    /// Latitude must be in `[-90, 90]` and longitude in `[-180, 180]` degrees, otherwise
    /// [`GeodeticError::InvalidArgument`] is returned.
    pub fn on_ellipsoid(
        lat: f64,
        lng: f64,
        height: f64,
        ellipsoid: Arc<Ellipsoid>,
    ) -> Result<Self, GeodeticError> {
        if !is_in_bounds(lat, -90.0, 90.0) {
            return Err(GeodeticError::InvalidArgument(format!(
                "latitude value must be numeric -90.0 .. +90.0 (given: {lat})"
            )));
        }

        if !is_in_bounds(lng, -180.0, 180.0) {
            return Err(GeodeticError::InvalidArgument(format!(
                "longitude value must be numeric -180.0 .. +180.0 (given: {lng})"
            )));
        }

        if !height.is_finite() {
            return Err(GeodeticError::InvalidArgument(format!(
                "height must be a finite number (given: {height})"
            )));
        }

        Ok(Self {
            lat,
            lng,
            height: height.round(),
            ellipsoid,
        })
    }

    /// Height above the ellipsoid in meters.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Reference ellipsoid of the coordinate.
    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    /// Returns true if both coordinates are defined on equal ellipsoids.
    pub fn has_same_ellipsoid(&self, other: &Coordinate) -> bool {
        Arc::ptr_eq(&self.ellipsoid, &other.ellipsoid) || self.ellipsoid == other.ellipsoid
    }

    /// Distance to `other` in meters measured by the given calculator.
    pub fn distance(
        &self,
        other: &Coordinate,
        calculator: &(impl DistanceCalculator + ?Sized),
    ) -> Result<f64, GeodeticError> {
        calculator.distance(self, other)
    }

    /// Earth-centered cartesian representation of the coordinate.
    pub fn to_cartesian(&self) -> Cartesian {
        Cartesian::from_coordinate(self)
    }

    /// Moves the coordinate to another datum with the given Helmert transformation.
    pub fn transform_datum(
        &self,
        to: Arc<Ellipsoid>,
        transform: &HelmertTransform,
    ) -> Result<Coordinate, GeodeticError> {
        let mut cartesian = self.to_cartesian();
        cartesian.transform_datum(to, transform);
        cartesian.to_coordinate()
    }
}

impl GeoPoint for Coordinate {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat == other.lat
            && self.lng == other.lng
            && self.height == other.height
            && self.has_same_ellipsoid(other)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

fn is_in_bounds(value: f64, lower: f64, upper: f64) -> bool {
    value.is_finite() && value >= lower && value <= upper
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CoordinateParams {
    lat: f64,
    lng: f64,
    #[serde(default)]
    height: f64,
    #[serde(default = "Ellipsoid::wgs84")]
    ellipsoid: Arc<Ellipsoid>,
}

#[cfg(feature = "serde")]
impl TryFrom<CoordinateParams> for Coordinate {
    type Error = GeodeticError;

    fn try_from(value: CoordinateParams) -> Result<Self, Self::Error> {
        Self::on_ellipsoid(value.lat, value.lng, value.height, value.ellipsoid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ellipsoid::GRS80;
    use assert_matches::assert_matches;

    #[test]
    fn validates_ranges() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert_matches!(
            Coordinate::new(90.1, 0.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Coordinate::new(0.0, -180.5),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Coordinate::with_height(0.0, 0.0, f64::INFINITY),
            Err(GeodeticError::InvalidArgument(_))
        );
    }

    #[test]
    fn height_is_rounded() {
        assert_eq!(Coordinate::with_height(1.0, 2.0, 10.4).unwrap().height(), 10.0);
        assert_eq!(Coordinate::with_height(1.0, 2.0, 10.5).unwrap().height(), 11.0);
        assert_eq!(Coordinate::with_height(1.0, 2.0, -3.6).unwrap().height(), -4.0);
        assert_eq!(Coordinate::new(1.0, 2.0).unwrap().height(), 0.0);
    }

    #[test]
    fn accessors() {
        let c = Coordinate::new(52.5, 13.4).unwrap();
        assert_eq!(c.points(), [13.4, 52.5]);
        assert_eq!(c.to_string(), "(52.5, 13.4)");
        assert_eq!(**c.ellipsoid(), *Ellipsoid::wgs84());
    }

    #[test]
    fn ellipsoid_matching() {
        let wgs = Coordinate::new(10.0, 10.0).unwrap();
        let custom = Ellipsoid::new("WGS-84", 6_378_137.0, 6_356_752.314245, 298.257223563).unwrap();
        let same = Coordinate::on_ellipsoid(10.0, 10.0, 0.0, Arc::new(custom)).unwrap();
        let grs =
            Coordinate::on_ellipsoid(10.0, 10.0, 0.0, Ellipsoid::named(GRS80).unwrap()).unwrap();

        assert!(wgs.has_same_ellipsoid(&same));
        assert_eq!(wgs, same);
        assert!(!wgs.has_same_ellipsoid(&grs));
        assert_ne!(wgs, grs);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 52.5, "lng": 13.4, "height": 7.7}"#).unwrap();
        assert_eq!(c, Coordinate::with_height(52.5, 13.4, 8.0).unwrap());

        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Coordinate>(&json).unwrap(), c);

        assert!(serde_json::from_str::<Coordinate>(r#"{"lat": 100.0, "lng": 0.0}"#).is_err());
    }
}
