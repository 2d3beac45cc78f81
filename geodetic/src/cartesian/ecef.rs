use std::fmt::{Display, Formatter};
use std::sync::Arc;

use nalgebra::Vector3;

use crate::error::GeodeticError;
use crate::geo::{Coordinate, Ellipsoid, GeoPoint, HelmertTransform};

/// Inverse conversion stops when latitude changes by less than this value (radians) between iterations.
const LATITUDE_CONVERGENCE: f64 = 1e-5;
/// Upper limit for the iterations of the inverse conversion.
const MAX_INVERSE_ITERATIONS: u32 = 100;

/// Earth-centered, Earth-fixed (ECEF) cartesian position relative to a reference ellipsoid.
///
/// Besides conversion from and to [`Coordinate`], the type provides the small set of vector operations needed for
/// great-circle computations. Note that [`Cartesian::normalize`] and [`Cartesian::scale_to_mean_radius`] modify the
/// value in place and return `&mut Self` so they can be chained.
#[derive(Debug, Clone, PartialEq)]
pub struct Cartesian {
    vector: Vector3<f64>,
    ellipsoid: Arc<Ellipsoid>,
}

impl Cartesian {
    /// Creates a new position with the given coordinates in meters.
    pub fn new(x: f64, y: f64, z: f64, ellipsoid: Arc<Ellipsoid>) -> Self {
        Self {
            vector: Vector3::new(x, y, z),
            ellipsoid,
        }
    }

    /// Converts geodetic coordinates to ECEF.
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        let ellipsoid = coordinate.ellipsoid().clone();
        let a = ellipsoid.semi_major_axis();
        let e2 = ellipsoid.eccentricity_squared();
        let h = coordinate.height();
        let (sin_phi, cos_phi) = coordinate.lat_rad().sin_cos();
        let (sin_lambda, cos_lambda) = coordinate.lng_rad().sin_cos();

        let v = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();

        Self::new(
            (v + h) * cos_phi * cos_lambda,
            (v + h) * cos_phi * sin_lambda,
            ((1.0 - e2) * v + h) * sin_phi,
            ellipsoid,
        )
    }

    /// Converts the position back to geodetic coordinates.
    ///
    /// Latitude is found by fixed point iteration, which normally converges in 2-4 steps. If it does not converge in
    /// 100 iterations, [`GeodeticError::NonConverging`] is returned.
    pub fn to_coordinate(&self) -> Result<Coordinate, GeodeticError> {
        let (x, y, z) = (self.x(), self.y(), self.z());
        if self.vector.norm() == 0.0 {
            return Err(GeodeticError::DegenerateGeometry(
                "the center of the ellipsoid has no geodetic position",
            ));
        }

        let a = self.ellipsoid.semi_major_axis();
        let e2 = self.ellipsoid.eccentricity_squared();

        let lambda = y.atan2(x);
        let p = (x * x + y * y).sqrt();
        let mut phi = (z / (p * (1.0 - e2))).atan();

        let mut iterations = 0;
        loop {
            if iterations == MAX_INVERSE_ITERATIONS {
                return Err(GeodeticError::NonConverging { iterations });
            }
            iterations += 1;

            let sin_phi = phi.sin();
            let v = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
            let next = ((z + e2 * v * sin_phi) / p).atan();
            let delta = (next - phi).abs();
            phi = next;

            if delta < LATITUDE_CONVERGENCE {
                break;
            }
        }

        log::trace!("ECEF to geodetic conversion converged after {iterations} iterations");

        // Same as `p / cos(phi) - v`, but stays finite at the poles.
        let (sin_phi, cos_phi) = phi.sin_cos();
        let h = p * cos_phi + z * sin_phi - a * (1.0 - e2 * sin_phi * sin_phi).sqrt();

        Coordinate::on_ellipsoid(
            phi.to_degrees(),
            lambda.to_degrees(),
            h,
            self.ellipsoid.clone(),
        )
    }

    /// X coordinate in meters.
    pub fn x(&self) -> f64 {
        self.vector.x
    }

    /// Y coordinate in meters.
    pub fn y(&self) -> f64 {
        self.vector.y
    }

    /// Z coordinate in meters.
    pub fn z(&self) -> f64 {
        self.vector.z
    }

    /// Position as a vector.
    pub fn vector(&self) -> &Vector3<f64> {
        &self.vector
    }

    /// Reference ellipsoid of the position.
    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    /// Euclidean length of the position vector.
    pub fn magnitude(&self) -> f64 {
        self.vector.norm()
    }

    /// Vector product `self × other`. The result is defined on the WGS-84 ellipsoid.
    pub fn cross(&self, other: &Cartesian) -> Cartesian {
        Self {
            vector: self.vector.cross(&other.vector),
            ellipsoid: Ellipsoid::wgs84(),
        }
    }

    /// Scalar product of two position vectors.
    pub fn dot(&self, other: &Cartesian) -> f64 {
        self.vector.dot(&other.vector)
    }

    /// Turns the vector into a unit vector with the same direction.
    ///
    /// Zero vectors (e.g. a cross product of collinear vectors) have no direction, for them
    /// [`GeodeticError::DegenerateGeometry`] is returned and the value is left unchanged.
    pub fn normalize(&mut self) -> Result<&mut Self, GeodeticError> {
        self.vector = self
            .vector
            .try_normalize(f64::MIN_POSITIVE)
            .ok_or(GeodeticError::DegenerateGeometry(
                "cannot normalize a zero length vector",
            ))?;
        Ok(self)
    }

    /// Multiplies the vector by the arithmetic mean radius of its ellipsoid. Applied to a unit vector, this places the
    /// point onto the surface of the mean sphere.
    pub fn scale_to_mean_radius(&mut self) -> &mut Self {
        self.vector *= self.ellipsoid.arithmetic_mean_radius();
        self
    }

    /// Applies a Helmert datum transformation in place. The position becomes defined on the `to` ellipsoid.
    pub fn transform_datum(&mut self, to: Arc<Ellipsoid>, transform: &HelmertTransform) {
        self.vector = transform.apply(&self.vector);
        self.ellipsoid = to;
    }
}

impl Display for Cartesian {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
