//! Conversion of coordinates and polylines into [`geo_types`] geometries with `x = longitude`, `y = latitude`.

use geo_types::{Coord, LineString, Point};

use crate::geo::{Coordinate, GeoPoint};
use crate::polyline::Polyline;

impl From<&Coordinate> for Coord<f64> {
    fn from(value: &Coordinate) -> Self {
        Coord {
            x: value.lng(),
            y: value.lat(),
        }
    }
}

impl From<&Coordinate> for Point<f64> {
    fn from(value: &Coordinate) -> Self {
        Point(value.into())
    }
}

impl From<&Polyline> for LineString<f64> {
    fn from(value: &Polyline) -> Self {
        LineString::new(value.points().iter().map(Coord::from).collect())
    }
}
