pub mod constants;
pub mod curve;
pub mod engine;
pub mod geo;
pub mod palette;
pub mod rings;
pub mod routes;
pub mod state;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use constants::*;
pub use curve::*;
pub use engine::*;
pub use geo::*;
pub use palette::*;
pub use rings::*;
pub use routes::*;
pub use state::*;
