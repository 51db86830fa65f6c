use glam::Vec3;

/// A latitude/longitude pair in degrees.
///
/// Nominal ranges are `[-90, 90]` and `[-180, 180]`, but values outside them
/// are accepted and extrapolated through the projection rather than clamped;
/// route data comes from trusted static configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Project onto a sphere of the given radius centered at the origin.
    pub fn to_vec3(self, radius: f32) -> Vec3 {
        lat_lon_to_vec3(self.lat, self.lon, radius)
    }
}

/// Standard spherical-to-Cartesian mapping used by globe visualizations.
///
/// The resulting point lies on the sphere surface: `‖v‖ == radius` up to
/// float rounding. Both poles are longitude-invariant.
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    let x = -radius * phi.sin() * theta.cos();
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();
    Vec3::new(x, y, z)
}
