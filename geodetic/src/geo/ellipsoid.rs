use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeodeticError;

/// Name of the World Geodetic System 1984 ellipsoid in the registry.
pub const WGS84: &str = "WGS-84";
/// Name of the Geodetic Reference System 1980 ellipsoid in the registry.
pub const GRS80: &str = "GRS-80";
/// Name of the Airy 1830 ellipsoid (used by OSGB36) in the registry.
pub const AIRY_1830: &str = "Airy-1830";
/// Name of the International (Hayford) 1924 ellipsoid in the registry.
pub const INTERNATIONAL_1924: &str = "International-1924";
/// Name of the Clarke 1866 ellipsoid in the registry.
pub const CLARKE_1866: &str = "Clarke-1866";

lazy_static! {
    static ref WGS84_ELLIPSOID: Arc<Ellipsoid> =
        Arc::new(Ellipsoid::predefined(WGS84, 6_378_137.0, 6_356_752.314245, 298.257223563));
    static ref REGISTRY: HashMap<&'static str, Arc<Ellipsoid>> = {
        let mut registry = HashMap::new();
        registry.insert(WGS84, WGS84_ELLIPSOID.clone());
        for (name, semi_major_axis, semi_minor_axis, inverse_flattening) in [
            (GRS80, 6_378_137.0, 6_356_752.314140, 298.257222100),
            (AIRY_1830, 6_377_563.396, 6_356_256.909, 299.3249646),
            (INTERNATIONAL_1924, 6_378_388.0, 6_356_911.946, 297.0),
            (CLARKE_1866, 6_378_206.4, 6_356_583.8, 294.9786982),
        ] {
            let ellipsoid =
                Ellipsoid::predefined(name, semi_major_axis, semi_minor_axis, inverse_flattening);
            registry.insert(name, Arc::new(ellipsoid));
        }
        registry
    };
}

/// Reference ellipsoid: the oblate spheroid used to model the shape of the Earth.
///
/// Ellipsoids are immutable. Two ellipsoids are considered the same only if their names and all
/// the axes match, so a custom ellipsoid with WGS-84 axes but a different name is a different
/// ellipsoid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EllipsoidParams"))]
pub struct Ellipsoid {
    name: Cow<'static, str>,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    inverse_flattening: f64,
}

impl Ellipsoid {
    /// Creates a custom ellipsoid.
    ///
    /// Returns [`GeodeticError::InvalidArgument`] unless `semi_major_axis > semi_minor_axis > 0` and the inverse
    /// flattening is a positive number.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        inverse_flattening: f64,
    ) -> Result<Self, GeodeticError> {
        let all_finite = semi_major_axis.is_finite()
            && semi_minor_axis.is_finite()
            && inverse_flattening.is_finite();
        if !all_finite || semi_minor_axis <= 0.0 || semi_major_axis <= semi_minor_axis {
            return Err(GeodeticError::InvalidArgument(format!(
                "ellipsoid axes must satisfy a > b > 0 (given: a = {semi_major_axis}, b = {semi_minor_axis})"
            )));
        }

        if inverse_flattening <= 0.0 {
            return Err(GeodeticError::InvalidArgument(format!(
                "inverse flattening must be positive (given: {inverse_flattening})"
            )));
        }

        Ok(Self {
            name: name.into(),
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
        })
    }

    const fn predefined(
        name: &'static str,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        inverse_flattening: f64,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
        }
    }

    /// Returns a shared instance of a registered ellipsoid.
    pub fn named(name: &str) -> Result<Arc<Self>, GeodeticError> {
        REGISTRY
            .get(name)
            .cloned()
            .ok_or_else(|| GeodeticError::UnknownEllipsoid(name.to_string()))
    }

    /// Shared WGS-84 ellipsoid, the default one for coordinates.
    pub fn wgs84() -> Arc<Self> {
        WGS84_ELLIPSOID.clone()
    }

    /// Names of all registered ellipsoids.
    pub fn registered_names() -> impl Iterator<Item = &'static str> {
        REGISTRY.keys().copied()
    }

    /// Name of the ellipsoid.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semi-major (equatorial) axis `a` in meters.
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Semi-minor (polar) axis `b` in meters.
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    /// Inverse flattening `1/f`.
    pub fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    /// Flattening `f`.
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// Squared first eccentricity `e² = (a² - b²) / a²`.
    pub fn eccentricity_squared(&self) -> f64 {
        let a2 = self.semi_major_axis * self.semi_major_axis;
        let b2 = self.semi_minor_axis * self.semi_minor_axis;
        (a2 - b2) / a2
    }

    /// Arithmetic mean radius `(2a + b) / 3` in meters.
    pub fn arithmetic_mean_radius(&self) -> f64 {
        (2.0 * self.semi_major_axis + self.semi_minor_axis) / 3.0
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84().as_ref().clone()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct EllipsoidParams {
    name: String,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    inverse_flattening: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<EllipsoidParams> for Ellipsoid {
    type Error = GeodeticError;

    fn try_from(value: EllipsoidParams) -> Result<Self, Self::Error> {
        Self::new(
            value.name,
            value.semi_major_axis,
            value.semi_minor_axis,
            value.inverse_flattening,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn wgs84_parameters() {
        let wgs84 = Ellipsoid::wgs84();
        assert_eq!(wgs84.name(), WGS84);
        assert_eq!(wgs84.semi_major_axis(), 6_378_137.0);
        assert_abs_diff_eq!(wgs84.eccentricity_squared(), 0.006_694_38, epsilon = 1e-8);
        assert_abs_diff_eq!(wgs84.arithmetic_mean_radius(), 6_371_008.771, epsilon = 1e-3);
    }

    #[test]
    fn named_lookup() {
        let grs80 = Ellipsoid::named(GRS80).unwrap();
        assert_eq!(grs80.semi_minor_axis(), 6_356_752.314140);
        assert!(Arc::ptr_eq(&Ellipsoid::named(WGS84).unwrap(), &Ellipsoid::wgs84()));
        assert_eq!(Ellipsoid::registered_names().count(), 5);

        assert_matches!(
            Ellipsoid::named("Bessel"),
            Err(GeodeticError::UnknownEllipsoid(name)) if name == "Bessel"
        );
    }

    #[test]
    fn equality_is_by_value() {
        let custom = Ellipsoid::new(WGS84, 6_378_137.0, 6_356_752.314245, 298.257223563).unwrap();
        assert_eq!(custom, *Ellipsoid::wgs84());

        let renamed = Ellipsoid::new("mine", 6_378_137.0, 6_356_752.314245, 298.257223563).unwrap();
        assert_ne!(renamed, *Ellipsoid::wgs84());
        assert_ne!(*Ellipsoid::named(GRS80).unwrap(), *Ellipsoid::wgs84());
    }

    #[test]
    fn invalid_parameters() {
        assert_matches!(
            Ellipsoid::new("flat", 1.0, 2.0, 300.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Ellipsoid::new("zero", 1.0, 0.0, 300.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Ellipsoid::new("nan", f64::NAN, 1.0, 300.0),
            Err(GeodeticError::InvalidArgument(_))
        );
        assert_matches!(
            Ellipsoid::new("f", 2.0, 1.0, -1.0),
            Err(GeodeticError::InvalidArgument(_))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates() {
        let json = serde_json::to_string(&*Ellipsoid::wgs84()).unwrap();
        let restored: Ellipsoid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, *Ellipsoid::wgs84());

        let broken = r#"{"name":"x","semi_major_axis":1.0,"semi_minor_axis":2.0,"inverse_flattening":1.0}"#;
        assert!(serde_json::from_str::<Ellipsoid>(broken).is_err());
    }
}
