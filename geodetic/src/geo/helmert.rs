use nalgebra::Vector3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seven parameter (small angle) Helmert transformation between two geodetic datums.
///
/// Translations are in meters, `scale` is the dimensionless scale change (not ppm) and the
/// rotations are in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelmertTransform {
    /// Translation along x axis.
    pub tx: f64,
    /// Translation along y axis.
    pub ty: f64,
    /// Translation along z axis.
    pub tz: f64,
    /// Scale change.
    pub scale: f64,
    /// Rotation about x axis.
    pub rx: f64,
    /// Rotation about y axis.
    pub ry: f64,
    /// Rotation about z axis.
    pub rz: f64,
}

impl HelmertTransform {
    /// Creates a transformation from the parameters in the form they are usually published in: scale in parts per
    /// million and rotations in arc-seconds.
    pub fn from_ppm_arcsec(
        tx: f64,
        ty: f64,
        tz: f64,
        scale_ppm: f64,
        rx_sec: f64,
        ry_sec: f64,
        rz_sec: f64,
    ) -> Self {
        let sec_to_rad = |sec: f64| (sec / 3600.0).to_radians();
        Self {
            tx,
            ty,
            tz,
            scale: scale_ppm * 1e-6,
            rx: sec_to_rad(rx_sec),
            ry: sec_to_rad(ry_sec),
            rz: sec_to_rad(rz_sec),
        }
    }

    /// WGS-84 to OSGB36 (Airy 1830) transformation as published by the Ordnance Survey.
    pub fn wgs84_to_osgb36() -> Self {
        Self::from_ppm_arcsec(
            -446.448, 125.157, -542.060, 20.4894, -0.1502, -0.2470, -0.8421,
        )
    }

    /// Reverse transformation. Exact only up to the small angle approximation.
    pub fn inverse(&self) -> Self {
        Self {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            scale: -self.scale,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
        }
    }

    pub(crate) fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let s = 1.0 + self.scale;
        Vector3::new(
            self.tx + v.x * s - v.y * self.rz + v.z * self.ry,
            self.ty + v.x * self.rz + v.y * s - v.z * self.rx,
            self.tz - v.x * self.ry + v.y * self.rx + v.z * s,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(HelmertTransform::default().apply(&v), v);
    }

    #[test]
    fn translation_and_scale() {
        let transform = HelmertTransform {
            tx: 10.0,
            ty: -5.0,
            tz: 1.0,
            scale: 0.5,
            ..Default::default()
        };
        let v = transform.apply(&Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(v, Vector3::new(13.0, -2.0, 4.0));
    }

    #[test]
    fn inverse_round_trip() {
        let transform = HelmertTransform::wgs84_to_osgb36();
        let v = Vector3::new(3_874_938.849, 116_218.624, 5_047_168.208);
        let back = transform.inverse().apply(&transform.apply(&v));
        assert_abs_diff_eq!(back.x, v.x, epsilon = 0.1);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 0.1);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 0.1);
    }
}
