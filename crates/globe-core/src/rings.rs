use std::time::Duration;

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{
    MAX_RINGS, RING_INTERVAL_SEC, RING_MAX_RADIUS_FACTOR, RING_PROPAGATION_SPEED,
};
use crate::palette::Rgb;

/// One expanding pulse anchored to an arc endpoint.
#[derive(Clone, Copy, Debug)]
pub struct Ring {
    pub center: Vec3,
    pub radius: f32,
    pub max_radius: f32,
    pub color: Rgb,
}

impl Ring {
    /// Remaining life mapped to `[0, 1]`; the renderer uses it as alpha.
    pub fn alpha(&self) -> f32 {
        1.0 - (self.radius / self.max_radius).clamp(0.0, 1.0)
    }
}

/// Spawns rings at randomly chosen anchors on a fixed cadence and expands
/// them until they fade out.
pub struct RingEmitter {
    pub rings: Vec<Ring>,
    max_rings: usize,
    max_radius: f32,
    interval: f64,
    next_spawn: f64,
    rng: StdRng,
}

impl RingEmitter {
    pub fn new(globe_radius: f32, seed: u64) -> Self {
        // Mix the seed so emitters draw a different stream than other
        // seeded subsystems sharing the same base seed.
        let mix = seed ^ 0x9E37_79B9_7F4A_7C15;
        Self {
            rings: Vec::new(),
            max_rings: MAX_RINGS,
            max_radius: globe_radius * RING_MAX_RADIUS_FACTOR,
            interval: RING_INTERVAL_SEC,
            next_spawn: 0.0,
            rng: StdRng::seed_from_u64(mix),
        }
    }

    /// Advance ring radii, despawn finished rings, and respawn on cadence.
    ///
    /// `anchors` are candidate centers with their colors (arc endpoints);
    /// fewer anchors than `max_rings` just spawns fewer rings.
    pub fn tick(&mut self, dt: Duration, now_sec: f64, anchors: &[(Vec3, Rgb)]) {
        let dt_sec = dt.as_secs_f32();
        for ring in &mut self.rings {
            ring.radius += RING_PROPAGATION_SPEED * dt_sec;
        }
        self.rings.retain(|r| r.radius < r.max_radius);

        if now_sec >= self.next_spawn {
            self.next_spawn = now_sec + self.interval;
            for index in distinct_indices(&mut self.rng, anchors.len(), self.max_rings) {
                let (center, color) = anchors[index];
                self.rings.push(Ring {
                    center,
                    radius: 0.0,
                    max_radius: self.max_radius,
                    color,
                });
            }
        }
    }
}

/// Up to `count` distinct indices in `[0, len)`.
fn distinct_indices(rng: &mut StdRng, len: usize, count: usize) -> Vec<usize> {
    let count = count.min(len);
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let candidate = rng.gen_range(0..len);
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    picked
}
