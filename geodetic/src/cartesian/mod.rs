//! Earth-centered cartesian positions and vector operations on them.

mod ecef;

pub use ecef::Cartesian;
