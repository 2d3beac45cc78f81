//! Geodetic coordinates (latitude, longitude and height) on a reference [`Ellipsoid`] and datum
//! transformations between ellipsoids (see [`HelmertTransform`]).

mod coordinate;
pub mod ellipsoid;
mod helmert;
mod point;

pub use coordinate::Coordinate;
pub use ellipsoid::Ellipsoid;
pub use helmert::HelmertTransform;
pub use point::GeoPoint;
