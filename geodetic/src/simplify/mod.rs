//! Polyline simplification: reducing the number of points while keeping the shape within a tolerance.

mod douglas_peucker;
mod perpendicular;

pub use douglas_peucker::DouglasPeucker;
pub use perpendicular::PerpendicularDistance;

use crate::polyline::Polyline;

/// Algorithm that removes points from a polyline.
pub trait Simplify {
    /// Returns a simplified copy of the polyline. The first and the last points are always preserved.
    fn simplify(&self, polyline: &Polyline) -> Polyline;
}
