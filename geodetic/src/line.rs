//! Geodesic line segment between two coordinates and nearest point search on it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cartesian::Cartesian;
use crate::distance::{DistanceCalculator, Vincenty};
use crate::error::GeodeticError;
use crate::geo::{Coordinate, GeoPoint};

/// Default tolerance in meters for deciding whether a point lies on a segment.
pub const DEFAULT_ON_SEGMENT_PRECISION: f64 = 5.0;

/// Bisection stops when the half segment becomes shorter than this (meters).
const BISECTION_STOP_DISTANCE: f64 = 1.0;
/// Segment length halves on every step, so half of the Earth circumference is done in ~25 steps.
const MAX_BISECTION_DEPTH: u32 = 64;

/// Algorithm used by [`Line::nearest_point`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NearestPointStrategy {
    /// Binary search: the segment is split in halves and the search continues in the half closer to the point
    /// until the half is shorter than one meter.
    #[default]
    Bisection,
    /// Foot of the perpendicular from the point to the great circle through the segment endpoints. If the foot is
    /// not on the segment, the segment midpoint is returned and [`NearestPoint::fallback`] is set.
    GreatCircle,
}

/// Result of the nearest point search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NearestPoint {
    /// Found point.
    pub point: Coordinate,
    /// Number of bisection steps performed. Always 0 for [`NearestPointStrategy::GreatCircle`].
    pub depth: u32,
    /// On-segment excess `|d(a, b) - d(a, t) - d(b, t)|` in meters of the last checked candidate. Zero means the
    /// candidate lies exactly on the segment.
    pub segment_precision: f64,
    /// True if the great-circle foot was not on the segment (or could not be computed) and the segment midpoint was
    /// returned instead.
    pub fallback: bool,
}

/// Segment of a geodesic between two points.
///
/// Distances inside the line (nearest point search, [`Line::distance_to`]) are measured with [`Vincenty`].
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    point1: Coordinate,
    point2: Coordinate,
    calculator: Vincenty,
    precision: f64,
    strategy: NearestPointStrategy,
}

impl Line {
    /// Creates a new line between two points.
    pub fn new(point1: Coordinate, point2: Coordinate) -> Self {
        Self {
            point1,
            point2,
            calculator: Vincenty::new(),
            precision: DEFAULT_ON_SEGMENT_PRECISION,
            strategy: NearestPointStrategy::default(),
        }
    }

    /// Sets the tolerance in meters used to decide whether a point is on the segment.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the nearest point search algorithm.
    pub fn with_strategy(mut self, strategy: NearestPointStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// First point of the line.
    pub fn point1(&self) -> &Coordinate {
        &self.point1
    }

    /// Second point of the line.
    pub fn point2(&self) -> &Coordinate {
        &self.point2
    }

    /// Both points of the line.
    pub fn points(&self) -> [&Coordinate; 2] {
        [&self.point1, &self.point2]
    }

    /// On-segment tolerance in meters.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Nearest point search algorithm.
    pub fn strategy(&self) -> NearestPointStrategy {
        self.strategy
    }

    /// Length of the line measured by the given calculator.
    pub fn length(
        &self,
        calculator: &(impl DistanceCalculator + ?Sized),
    ) -> Result<f64, GeodeticError> {
        calculator.distance(&self.point1, &self.point2)
    }

    /// Line with the same points in reversed order.
    pub fn reverse(&self) -> Self {
        Self {
            point1: self.point2.clone(),
            point2: self.point1.clone(),
            ..self.clone()
        }
    }

    /// Half-way point along the great circle path between the line points.
    pub fn midpoint(&self) -> Result<Coordinate, GeodeticError> {
        midpoint(&self.point1, &self.point2)
    }

    /// Returns true if `point` is on the segment within [`Line::precision`].
    pub fn contains(&self, point: &Coordinate) -> Result<bool, GeodeticError> {
        Ok(self.segment_excess(&self.point1, &self.point2, point)? < self.precision)
    }

    /// Point of the segment nearest to the given point, found with the line's [`NearestPointStrategy`].
    pub fn nearest_point(&self, point: &Coordinate) -> Result<NearestPoint, GeodeticError> {
        self.nearest_point_with(self.strategy, point)
    }

    /// Point of the segment nearest to the given point, found with the given strategy.
    pub fn nearest_point_with(
        &self,
        strategy: NearestPointStrategy,
        point: &Coordinate,
    ) -> Result<NearestPoint, GeodeticError> {
        match strategy {
            NearestPointStrategy::Bisection => self.nearest_point_bisection(point),
            NearestPointStrategy::GreatCircle => self.nearest_point_great_circle(point),
        }
    }

    /// Distance in meters between the point and the nearest point of the segment.
    pub fn distance_to(&self, point: &Coordinate) -> Result<f64, GeodeticError> {
        self.nearest_point(point)?
            .point
            .distance(point, &self.calculator)
    }

    fn nearest_point_bisection(&self, point: &Coordinate) -> Result<NearestPoint, GeodeticError> {
        let mut a = self.point1.clone();
        let mut b = self.point2.clone();

        for depth in 1..=MAX_BISECTION_DEPTH {
            let middle = midpoint(&a, &b)?;
            let a_excess = self.segment_excess(&a, &middle, point)?;
            let b_excess = self.segment_excess(&b, &middle, point)?;
            let remaining = middle.distance(&b, &self.calculator)?;

            if b_excess < a_excess {
                a = b;
            }

            if remaining <= BISECTION_STOP_DISTANCE {
                log::trace!("Nearest point to {point} found after {depth} bisection steps");
                return Ok(NearestPoint {
                    point: middle,
                    depth,
                    segment_precision: a_excess.min(b_excess),
                    fallback: false,
                });
            }

            b = middle;
        }

        Err(GeodeticError::NonConverging {
            iterations: MAX_BISECTION_DEPTH,
        })
    }

    fn nearest_point_great_circle(
        &self,
        point: &Coordinate,
    ) -> Result<NearestPoint, GeodeticError> {
        let segment_precision = match self.great_circle_foot(point)? {
            Some(foot) => {
                let excess = self.segment_excess(&self.point1, &self.point2, &foot)?;
                if excess < self.precision {
                    return Ok(NearestPoint {
                        point: foot,
                        depth: 0,
                        segment_precision: excess,
                        fallback: false,
                    });
                }

                log::debug!(
                    "Perpendicular foot {foot} is off the segment {} - {} by {excess} m, using the midpoint",
                    self.point1,
                    self.point2
                );
                excess
            }
            None => {
                log::debug!(
                    "No great circle through {} and {} contains a perpendicular to {point}, using the midpoint",
                    self.point1,
                    self.point2
                );
                f64::INFINITY
            }
        };

        Ok(NearestPoint {
            point: self.midpoint()?,
            depth: 0,
            segment_precision,
            fallback: true,
        })
    }

    /// Foot of the perpendicular from `point` to the great circle through the line points, on the ellipsoid surface.
    ///
    /// Returns `None` if the great circle is not defined (coincident or antipodal line points) or the point is the
    /// pole of the great circle.
    fn great_circle_foot(&self, point: &Coordinate) -> Result<Option<Coordinate>, GeodeticError> {
        let a = self.point1.to_cartesian();
        let b = self.point2.to_cartesian();
        let c = point.to_cartesian();

        let Some(pole) = onto_mean_sphere(a.cross(&b)) else {
            return Ok(None);
        };
        let Some(meridian) = onto_mean_sphere(c.cross(&pole)) else {
            return Ok(None);
        };
        let Some(foot) = onto_mean_sphere(pole.cross(&meridian)) else {
            return Ok(None);
        };

        let foot = foot.to_coordinate()?;
        Coordinate::on_ellipsoid(foot.lat(), foot.lng(), 0.0, self.point1.ellipsoid().clone())
            .map(Some)
    }

    /// How much longer the path `a -> t -> b` is than `a -> b`, in meters.
    fn segment_excess(
        &self,
        a: &Coordinate,
        b: &Coordinate,
        t: &Coordinate,
    ) -> Result<f64, GeodeticError> {
        let ab = a.distance(b, &self.calculator)?;
        let at = a.distance(t, &self.calculator)?;
        let bt = b.distance(t, &self.calculator)?;
        Ok((ab - at - bt).abs())
    }
}

fn onto_mean_sphere(mut vector: Cartesian) -> Option<Cartesian> {
    vector.normalize().ok()?.scale_to_mean_radius();
    Some(vector)
}

fn midpoint(a: &Coordinate, b: &Coordinate) -> Result<Coordinate, GeodeticError> {
    let (lat_a, lng_a) = (a.lat_rad(), a.lng_rad());
    let lat_b = b.lat_rad();
    let delta_lng = b.lng_rad() - lng_a;

    let bx = lat_b.cos() * delta_lng.cos();
    let by = lat_b.cos() * delta_lng.sin();

    let lat = (lat_a.sin() + lat_b.sin())
        .atan2(((lat_a.cos() + bx).powi(2) + by * by).sqrt())
        .to_degrees();
    let mut lng = (lng_a + by.atan2(lat_a.cos() + bx)).to_degrees();
    if !(-180.0..=180.0).contains(&lng) {
        lng = (lng + 540.0).rem_euclid(360.0) - 180.0;
    }

    Coordinate::on_ellipsoid(lat, lng, 0.0, a.ellipsoid().clone())
}
