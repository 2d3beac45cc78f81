//! Geodetic geometry on a reference ellipsoid.
//!
//! * [`geo`] - ellipsoids, validated [`Coordinate`]s and datum transformations,
//! * [`cartesian`] - Earth-centered cartesian positions,
//! * [`distance`] - interchangeable distance calculators,
//! * [`line`] - geodesic segments and nearest point search,
//! * [`polyline`] and [`simplify`] - point sequences and their simplification.
//!
//! ```
//! use geodetic::distance::{DistanceCalculator, Vincenty};
//! use geodetic::geo::Coordinate;
//! use geodetic::line::Line;
//!
//! let line = Line::new(Coordinate::new(0.0, 0.0)?, Coordinate::new(0.0, 10.0)?);
//! let length = line.length(&Vincenty::new())?;
//! assert!((length - 1_113_194.908).abs() < 1e-3);
//! # Ok::<(), geodetic::error::GeodeticError>(())
//! ```

pub mod cartesian;
pub mod distance;
pub mod error;
pub mod geo;
pub mod line;
pub mod polyline;
pub mod simplify;

#[cfg(feature = "geo-types")]
mod geo_types;
#[cfg(feature = "geojson")]
mod geojson;

pub use cartesian::Cartesian;
pub use distance::DistanceCalculator;
pub use error::GeodeticError;
pub use geo::{Coordinate, Ellipsoid, GeoPoint};
pub use line::{Line, NearestPoint, NearestPointStrategy};
pub use polyline::Polyline;
pub use simplify::{DouglasPeucker, Simplify};
