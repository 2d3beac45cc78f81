//! Conversion of coordinates and polylines into [`geojson`] geometries.
//!
//! Positions are written in `[longitude, latitude]` order. Height is not exported.

use geojson::{Geometry, Position, Value};

use crate::geo::{Coordinate, GeoPoint};
use crate::polyline::Polyline;

fn position(coordinate: &Coordinate) -> Position {
    coordinate.points().to_vec()
}

impl From<&Coordinate> for Geometry {
    fn from(value: &Coordinate) -> Self {
        Geometry::new(Value::Point(position(value)))
    }
}

impl From<&Polyline> for Geometry {
    fn from(value: &Polyline) -> Self {
        Geometry::new(Value::LineString(
            value.points().iter().map(position).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let geometry = Geometry::from(&Coordinate::new(52.5, 13.4).unwrap());
        assert_eq!(geometry.value, Value::Point(vec![13.4, 52.5]));
    }

    #[test]
    fn line_string() {
        let polyline: Polyline = [(52.5, 13.4), (51.5, 7.0)]
            .into_iter()
            .map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
            .collect();
        let geometry = Geometry::from(&polyline);
        assert_eq!(
            geometry.value,
            Value::LineString(vec![vec![13.4, 52.5], vec![7.0, 51.5]])
        );
    }
}
