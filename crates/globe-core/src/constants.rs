// Shared visual tuning constants used by the core engine and the native viewer.

// Scene layout
pub const GLOBE_RADIUS: f32 = 3.2;
pub const CAMERA_Z: f32 = 6.5; // camera eye distance on +Z
pub const CAMERA_FOVY_DEG: f32 = 70.0;

// Arc geometry
pub const ARC_CONTROL_SCALE: f32 = 1.3; // inner control points pushed outward from the sphere center
pub const ARC_SAMPLES: usize = 150; // polyline segments per arc

// Dash pattern, in world units along the polyline
pub const DASH_SIZE: f32 = 0.2;
pub const GAP_SIZE: f32 = 0.16;

// Animation defaults
pub const DEFAULT_DASH_SPEED: f32 = 0.7;
pub const DEFAULT_DOT_SPEED: f32 = 0.35;
pub const DEFAULT_DOTS_PER_ARC: usize = 2;
pub const DOT_RADIUS_FACTOR: f32 = 0.025; // dot world radius as a fraction of the globe radius

// Auto-rotation of the view (radians per second; ~0.002 rad per frame at 60 fps)
pub const SPIN_SPEED: f32 = 0.12;

// Ring pulses at arc endpoints
pub const RING_PROPAGATION_SPEED: f32 = 3.0;
pub const MAX_RINGS: usize = 3;
pub const RING_INTERVAL_SEC: f64 = 2.0;
pub const RING_MAX_RADIUS_FACTOR: f32 = 0.25; // rings fade out at this fraction of the globe radius

// Default arc palette, cycled by route index
pub const DEFAULT_ARC_COLORS: [&str; 5] = ["#ffffff", "#00ffd0", "#ff8a00", "#7aa2ff", "#ff66c4"];
