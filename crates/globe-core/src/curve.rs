use glam::Vec3;

use crate::constants::ARC_CONTROL_SCALE;

/// Cubic Bezier curve through four control points.
#[derive(Clone, Debug)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Arc between two points on a sphere centered at the origin.
    ///
    /// The inner control points are the endpoints scaled outward from the
    /// center, which bulges the curve above the surface. The scale factor is
    /// fixed regardless of angular distance; antipodal or near-zero-length
    /// routes degenerate visibly, which is a known limitation of the scheme.
    pub fn between(start: Vec3, end: Vec3) -> Self {
        Self {
            p0: start,
            p1: start * ARC_CONTROL_SCALE,
            p2: end * ARC_CONTROL_SCALE,
            p3: end,
        }
    }

    /// Evaluate at parameter `u` with the standard cubic basis.
    ///
    /// Exact at the endpoints: `point_at(0.0) == p0` and `point_at(1.0) == p3`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        let v = 1.0 - u;
        self.p0 * (v * v * v)
            + self.p1 * (3.0 * v * v * u)
            + self.p2 * (3.0 * v * u * u)
            + self.p3 * (u * u * u)
    }

    /// Sample `n` segments into `n + 1` points for a renderable polyline.
    pub fn sample(&self, n: usize) -> Vec<Vec3> {
        let n = n.max(1);
        (0..=n).map(|i| self.point_at(i as f32 / n as f32)).collect()
    }
}
