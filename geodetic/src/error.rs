//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodeticError {
    /// A value given to a constructor is outside of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No ellipsoid is registered under the given name.
    #[error("unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),
    /// The points of a distance calculation are defined on different ellipsoids.
    #[error("the ellipsoids of both coordinates must match")]
    MismatchedEllipsoid,
    /// An iterative computation did not converge.
    #[error("computation did not converge after {iterations} iterations")]
    NonConverging {
        /// Number of iterations performed before giving up.
        iterations: u32,
    },
    /// The geometry has no defined direction, e.g. a zero length vector.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
