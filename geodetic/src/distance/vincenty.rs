use crate::distance::{ensure_same_ellipsoid, round_to_mm, DistanceCalculator};
use crate::error::GeodeticError;
use crate::geo::{Coordinate, GeoPoint};

const DEFAULT_MAX_ITERATIONS: u32 = 200;
const LAMBDA_CONVERGENCE: f64 = 1e-12;

/// Distance along the geodesic on the ellipsoid, computed with Vincenty's inverse formula.
///
/// Results are rounded to millimeters. Both coordinates must be defined on the same ellipsoid. For nearly antipodal
/// points the iteration may not converge, in which case [`GeodeticError::NonConverging`] is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vincenty {
    max_iterations: u32,
}

impl Vincenty {
    /// Creates a calculator with the default iteration limit of 200.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Changes the maximum number of iterations before the calculation gives up.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    /// Maximum number of iterations.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl Default for Vincenty {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceCalculator for Vincenty {
    fn distance(&self, point1: &Coordinate, point2: &Coordinate) -> Result<f64, GeodeticError> {
        ensure_same_ellipsoid(point1, point2)?;

        let ellipsoid = point1.ellipsoid();
        let a = ellipsoid.semi_major_axis();
        let f = ellipsoid.flattening();
        let b = a * (1.0 - f);

        let l = point2.lng_rad() - point1.lng_rad();
        let u1 = ((1.0 - f) * point1.lat_rad().tan()).atan();
        let u2 = ((1.0 - f) * point2.lat_rad().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut iterations = 0;

        let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
            if iterations == self.max_iterations {
                log::debug!(
                    "Vincenty iteration did not converge for {point1} and {point2} after {iterations} iterations"
                );
                return Err(GeodeticError::NonConverging { iterations });
            }
            iterations += 1;

            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();

            if sin_sigma == 0.0 {
                // coincident points
                return Ok(0.0);
            }

            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // equatorial line: cos_sq_alpha = 0
            let cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - previous).abs() <= LAMBDA_CONVERGENCE {
                break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
            }
        };

        log::trace!("Vincenty iteration converged after {iterations} iterations");

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

        Ok(round_to_mm(b * big_a * (sigma - delta_sigma)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ellipsoid::GRS80;
    use crate::geo::Ellipsoid;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn flinders_peak_to_buninyong() {
        let flinders_peak = Coordinate::new(-37.95103342, 144.42486789).unwrap();
        let buninyong = Coordinate::new(-37.65282114, 143.92649554).unwrap();

        let distance = Vincenty::new().distance(&flinders_peak, &buninyong).unwrap();
        assert_abs_diff_eq!(distance, 54_972.271, epsilon = 1e-3);
    }

    #[test]
    fn known_distances() {
        let vincenty = Vincenty::default();
        let c = |lat, lng| Coordinate::new(lat, lng).unwrap();

        assert_abs_diff_eq!(
            vincenty.distance(&c(52.5, 13.4), &c(51.5, 7.0)).unwrap(),
            453_234.388,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            vincenty.distance(&c(0.0, 0.0), &c(0.0, 10.0)).unwrap(),
            1_113_194.908,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            vincenty.distance(&c(0.0, 0.0), &c(5.0, 5.0)).unwrap(),
            784_028.74,
            epsilon = 1e-3
        );
    }

    #[test]
    fn symmetric_and_zero_for_same_point() {
        let a = Coordinate::new(-33.86, 151.21).unwrap();
        let b = Coordinate::new(40.71, -74.0).unwrap();
        let vincenty = Vincenty::new();

        assert_abs_diff_eq!(
            vincenty.distance(&a, &b).unwrap(),
            vincenty.distance(&b, &a).unwrap(),
            epsilon = 1e-3
        );
        assert_eq!(vincenty.distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn antipodal_points_do_not_converge() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(0.0, 180.0).unwrap();

        assert_matches!(
            Vincenty::new().distance(&a, &b),
            Err(GeodeticError::NonConverging { iterations: 200 })
        );
        assert_matches!(
            Vincenty::new().with_max_iterations(10).distance(&a, &b),
            Err(GeodeticError::NonConverging { iterations: 10 })
        );
    }

    #[test]
    fn mismatched_ellipsoid() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::on_ellipsoid(1.0, 1.0, 0.0, Ellipsoid::named(GRS80).unwrap()).unwrap();

        assert_matches!(
            Vincenty::new().distance(&a, &b),
            Err(GeodeticError::MismatchedEllipsoid)
        );
    }
}
