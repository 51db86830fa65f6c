use std::time::Duration;

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{
    ARC_SAMPLES, DEFAULT_DASH_SPEED, DEFAULT_DOTS_PER_ARC, DEFAULT_DOT_SPEED, GLOBE_RADIUS,
};
use crate::curve::CubicBezier;
use crate::palette::{Palette, Rgb};
use crate::routes::Route;

/// Engine-wide configuration; per-route overrides win over these.
#[derive(Clone, Debug)]
pub struct EngineParams {
    pub radius: f32,
    pub dash_speed: f32,
    pub dot_speed: f32,
    pub dots_per_arc: usize,
    pub palette: Palette,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            dash_speed: DEFAULT_DASH_SPEED,
            dot_speed: DEFAULT_DOT_SPEED,
            dots_per_arc: DEFAULT_DOTS_PER_ARC,
            palette: Palette::default(),
        }
    }
}

/// A route resolved against the sphere: projected endpoints, the cached curve
/// and polyline, and the per-arc animation state the renderer consumes.
#[derive(Clone, Debug)]
pub struct Arc {
    pub start: Vec3,
    pub end: Vec3,
    pub curve: CubicBezier,
    /// Cached polyline samples, recomputed only when endpoints or radius
    /// change.
    pub points: Vec<Vec3>,
    pub color: Rgb,
    pub dash_speed: f32,
    pub dot_speed: f32,
    /// Monotonically decreasing; the renderer applies it modulo the dash
    /// pattern length, so it never needs to wrap here.
    pub dash_offset: f32,
    dot_offsets: SmallVec<[f32; 4]>,
}

impl Arc {
    pub fn dot_count(&self) -> usize {
        self.dot_offsets.len()
    }

    /// Phase offsets `i / dot_count`, pairwise distinct in `[0, 1)`.
    pub fn dot_offsets(&self) -> &[f32] {
        &self.dot_offsets
    }
}

/// Position of one traveling dot, emitted each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotPosition {
    pub arc_index: usize,
    pub dot_index: usize,
    pub phase: f32,
    pub position: Vec3,
}

/// Owns every arc and its animation state; ticked once per rendered frame by
/// the host loop. Single-threaded by design.
pub struct ArcEngine {
    pub arcs: Vec<Arc>,
    pub params: EngineParams,
    routes: Vec<Route>,
}

impl ArcEngine {
    pub fn new(routes: Vec<Route>, params: EngineParams) -> Self {
        let arcs = build_arcs(&routes, &params);
        Self {
            arcs,
            params,
            routes,
        }
    }

    /// Rebuild the cached curves for a new sphere radius.
    pub fn set_radius(&mut self, radius: f32) {
        self.params.radius = radius;
        self.rebuild();
    }

    /// Replace the route list, keeping the engine parameters.
    pub fn set_routes(&mut self, routes: Vec<Route>) {
        self.routes = routes;
        self.rebuild();
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Advance one animation frame.
    ///
    /// `dt` is the time since the previous tick and `now_sec` the global
    /// clock. Dash offsets accumulate in place; dot positions are appended to
    /// `out` so the caller decides how to apply them.
    pub fn tick(&mut self, dt: Duration, now_sec: f64, out: &mut Vec<DotPosition>) {
        let dt_sec = dt.as_secs_f32();
        for (arc_index, arc) in self.arcs.iter_mut().enumerate() {
            arc.dash_offset -= dt_sec * arc.dash_speed;
            let base = (now_sec * arc.dot_speed as f64).fract() as f32;
            for (dot_index, offset) in arc.dot_offsets.iter().enumerate() {
                let phase = (base + offset).fract();
                out.push(DotPosition {
                    arc_index,
                    dot_index,
                    phase,
                    position: arc.curve.point_at(phase),
                });
            }
        }
    }

    fn rebuild(&mut self) {
        self.arcs = build_arcs(&self.routes, &self.params);
    }
}

fn build_arcs(routes: &[Route], params: &EngineParams) -> Vec<Arc> {
    routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let start = route.start.to_vec3(params.radius);
            let end = route.end.to_vec3(params.radius);
            let curve = CubicBezier::between(start, end);
            let points = curve.sample(ARC_SAMPLES);
            let dot_count = route.dot_count.unwrap_or(params.dots_per_arc);
            let dot_offsets = (0..dot_count)
                .map(|i| i as f32 / dot_count as f32)
                .collect();
            Arc {
                start,
                end,
                curve,
                points,
                color: route
                    .color
                    .unwrap_or_else(|| params.palette.color_for(index)),
                dash_speed: route.dash_speed.unwrap_or(params.dash_speed),
                dot_speed: route.dot_speed.unwrap_or(params.dot_speed),
                dash_offset: 0.0,
                dot_offsets,
            }
        })
        .collect()
}
