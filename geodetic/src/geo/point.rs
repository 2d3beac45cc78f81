use num_traits::Float;

/// Point on the surface of an ellipsoid given by latitude and longitude in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lng(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lng_rad(&self) -> Self::Num {
        self.lng().to_radians()
    }

    /// Coordinates in `[lng, lat]` order, as used by GeoJSON and other x/y formats.
    fn points(&self) -> [Self::Num; 2] {
        [self.lng(), self.lat()]
    }
}
