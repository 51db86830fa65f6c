//! Camera and view-orientation state shared with the viewer front-end.
//!
//! These types intentionally avoid platform APIs so they can be driven and
//! tested headless; the viewer consumes them to build view matrices each
//! frame.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, SPIN_SPEED};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Default view for the demo scene: pulled back on +Z, wide field.
    pub fn front(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// The same camera with its eye orbited around the +Y axis.
    pub fn orbited(&self, angle: f32) -> Self {
        let mut cam = self.clone();
        cam.eye = Mat4::from_rotation_y(angle).transform_point3(self.eye);
        cam
    }
}

/// Slow auto-rotation of the view, advanced once per rendered frame.
#[derive(Clone, Debug)]
pub struct GlobeSpin {
    /// Current orbit angle, kept in `[0, TAU)`.
    pub angle: f32,
    /// Radians per second.
    pub speed: f32,
}

impl Default for GlobeSpin {
    fn default() -> Self {
        Self {
            angle: 0.0,
            speed: SPIN_SPEED,
        }
    }
}

impl GlobeSpin {
    pub fn tick(&mut self, dt: Duration) {
        self.angle = (self.angle + self.speed * dt.as_secs_f32()).rem_euclid(TAU);
    }
}
