use crate::error::GeodeticError;
use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::simplify::{PerpendicularDistance, Simplify};

/// Ramer-Douglas-Peucker simplification.
///
/// The first and the last points are connected with a great circle chord and the point farthest from it (by
/// [`PerpendicularDistance`]) is found. If it is farther than the tolerance, it is kept and both halves are processed
/// the same way, otherwise all the points between the chord ends are dropped.
///
/// ```
/// use geodetic::geo::Coordinate;
/// use geodetic::polyline::Polyline;
/// use geodetic::simplify::DouglasPeucker;
///
/// let polyline: Polyline = [(0.0, 0.0), (0.0001, 1.0), (0.0, 2.0)]
///     .into_iter()
///     .map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
///     .collect();
///
/// let simplified = polyline.simplify(&DouglasPeucker::new(100.0).unwrap());
/// assert_eq!(simplified.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DouglasPeucker {
    tolerance: f64,
    metric: PerpendicularDistance,
}

impl DouglasPeucker {
    /// Creates a simplifier with the given tolerance in meters.
    ///
    /// The tolerance must be a non-negative number.
    pub fn new(tolerance: f64) -> Result<Self, GeodeticError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(GeodeticError::InvalidArgument(format!(
                "tolerance must be a non-negative number of meters (given: {tolerance})"
            )));
        }

        Ok(Self {
            tolerance,
            metric: PerpendicularDistance,
        })
    }

    /// Maximum allowed deviation in meters.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Simplifies a sequence of points. Sequences of less than 3 points are returned unchanged.
    pub fn simplify_points(&self, points: &[Coordinate]) -> Vec<Coordinate> {
        if points.len() < 3 {
            return points.to_vec();
        }

        let last = points.len() - 1;
        let mut keep = vec![false; points.len()];
        keep[0] = true;
        keep[last] = true;

        // Same result as the recursive formulation, but long inputs cannot overflow the stack.
        let mut ranges = vec![(0, last)];
        while let Some((start, end)) = ranges.pop() {
            if end - start < 2 {
                continue;
            }

            let (index, max_distance) = self.farthest_point(points, start, end);
            if max_distance > self.tolerance {
                keep[index] = true;
                ranges.push((index, end));
                ranges.push((start, index));
            }
        }

        points
            .iter()
            .zip(keep)
            .filter_map(|(point, keep)| keep.then(|| point.clone()))
            .collect()
    }

    /// Index and distance of the first point between `start` and `end` with the largest distance to the chord.
    fn farthest_point(&self, points: &[Coordinate], start: usize, end: usize) -> (usize, f64) {
        let mut index = start;
        let mut max_distance = 0.0;

        for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let distance = self
                .metric
                .distance_to_chord(point, &points[start], &points[end]);
            if distance > max_distance {
                index = i;
                max_distance = distance;
            }
        }

        (index, max_distance)
    }
}

impl Simplify for DouglasPeucker {
    fn simplify(&self, polyline: &Polyline) -> Polyline {
        let simplified = Polyline::from(self.simplify_points(polyline.points()));
        log::debug!(
            "Simplified polyline from {} to {} points with tolerance {} m",
            polyline.len(),
            simplified.len(),
            self.tolerance
        );
        simplified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use assert_matches::assert_matches;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn polyline(points: &[(f64, f64)]) -> Polyline {
        points.iter().map(|&(lat, lng)| c(lat, lng)).collect()
    }

    /// Wavy track along the equator.
    fn track() -> Polyline {
        (0..60)
            .map(|i| {
                let i = i as f64;
                c(0.02 * (i * 0.4).sin() + 0.005 * (i * 1.7).cos(), i * 0.01)
            })
            .collect()
    }

    #[test]
    fn invalid_tolerance() {
        assert_matches!(
            DouglasPeucker::new(-1.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            DouglasPeucker::new(f64::NAN),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_eq!(DouglasPeucker::new(0.0).unwrap().tolerance(), 0.0);
    }

    #[test]
    fn short_inputs_are_unchanged() {
        let simplifier = DouglasPeucker::new(1000.0).unwrap();
        for input in [
            polyline(&[]),
            polyline(&[(1.0, 1.0)]),
            polyline(&[(1.0, 1.0), (2.0, 2.0)]),
        ] {
            assert_eq!(simplifier.simplify(&input), input);
        }
    }

    #[test]
    fn removes_small_deviations() {
        let input = polyline(&[(0.0, 0.0), (0.0001, 1.0), (-0.0001, 2.0), (0.0, 3.0)]);
        let simplified = DouglasPeucker::new(100.0).unwrap().simplify(&input);
        assert_eq!(simplified, polyline(&[(0.0, 0.0), (0.0, 3.0)]));
    }

    #[test]
    fn keeps_large_deviations() {
        // L-shaped track: east along the equator, then north along the 2nd meridian
        let input = polyline(&[(0.0, 0.0), (0.0001, 1.0), (0.0, 2.0), (1.0, 2.0001), (2.0, 2.0)]);
        let simplified = DouglasPeucker::new(100.0).unwrap().simplify(&input);
        assert_eq!(simplified, polyline(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0)]));
    }

    #[test]
    fn zero_tolerance_keeps_every_bend() {
        let input = track();
        let simplified = DouglasPeucker::new(0.0).unwrap().simplify(&input);
        assert_eq!(simplified, input);
    }

    #[test]
    fn endpoints_are_preserved() {
        let input = track();
        let simplified = DouglasPeucker::new(1_000_000.0).unwrap().simplify(&input);
        assert_eq!(simplified.points(), [input.points()[0].clone(), input.points()[59].clone()]);
    }

    #[test]
    fn output_is_subsequence_of_input() {
        let input = track();
        let simplified = DouglasPeucker::new(200.0).unwrap().simplify(&input);

        let mut remaining = input.points().iter();
        for point in simplified.points() {
            assert!(remaining.any(|p| p == point));
        }
    }

    #[test]
    fn idempotent() {
        let input = track();
        for tolerance in [10.0, 100.0, 500.0, 2000.0] {
            let simplifier = DouglasPeucker::new(tolerance).unwrap();
            let once = simplifier.simplify(&input);
            let twice = simplifier.simplify(&once);
            assert_eq!(once, twice, "tolerance {tolerance}");
        }
    }

    #[test]
    fn monotonic_in_tolerance() {
        let input = track();
        let counts: Vec<_> = [0.0, 10.0, 100.0, 300.0, 1000.0, 3000.0, 10_000.0]
            .into_iter()
            .map(|tolerance| {
                DouglasPeucker::new(tolerance)
                    .unwrap()
                    .simplify(&input)
                    .len()
            })
            .collect();

        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]), "{counts:?}");
        assert!(counts[0] > *counts.last().unwrap());
    }

    #[test]
    fn closed_ring() {
        let ring = polyline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);

        assert_eq!(DouglasPeucker::new(1000.0).unwrap().simplify(&ring), ring);

        let collapsed = DouglasPeucker::new(1.0e7).unwrap().simplify(&ring);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed.points()[0].lat(), 0.0);
    }
}
