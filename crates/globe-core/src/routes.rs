use rand::prelude::*;

use crate::geo::GeoPoint;
use crate::palette::Rgb;

/// One route to draw as an animated arc between two surface points.
///
/// `None` fields fall back to the engine parameters when the route is
/// resolved into an [`crate::engine::Arc`].
#[derive(Clone, Debug)]
pub struct Route {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Explicit color; `None` cycles the engine palette by route index.
    pub color: Option<Rgb>,
    pub dash_speed: Option<f32>,
    pub dot_speed: Option<f32>,
    pub dot_count: Option<usize>,
}

impl Route {
    pub fn between(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            color: None,
            dash_speed: None,
            dot_speed: None,
            dot_count: None,
        }
    }
}

/// Built-in demo catalog: Québec City fanning out across the globe.
pub fn demo_routes() -> Vec<Route> {
    const HUB: GeoPoint = GeoPoint::new(46.8139, -71.208);
    [
        GeoPoint::new(40.7128, -74.006),       // New York
        GeoPoint::new(48.8566, 2.3522),        // Paris
        GeoPoint::new(52.52, 13.405),          // Berlin
        GeoPoint::new(28.434883, 5.014139),    // Algerian Sahara
        GeoPoint::new(67.125155, -598.747897), // wrapped longitude, projected as-is
        GeoPoint::new(-26.2041, 28.0473),      // Johannesburg
        GeoPoint::new(82.650330, -73.672977),  // Ellesmere Island
        GeoPoint::new(39.9042, 116.4074),      // Beijing
        GeoPoint::new(35.6895, 139.6917),      // Tokyo
        GeoPoint::new(55.7558, 37.6176),       // Moscow
        GeoPoint::new(-34.6037, -58.3816),     // Buenos Aires
        GeoPoint::new(-23.5505, -46.6333),     // São Paulo
    ]
    .into_iter()
    .map(|end| Route::between(HUB, end))
    .collect()
}

/// Random route set for a dense effect, deterministic for a given seed.
/// Latitudes stay inside ±70° so routes avoid the poles.
pub fn random_routes(n: usize, seed: u64) -> Vec<Route> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let start = GeoPoint::new(rng.gen_range(-70.0..70.0), rng.gen_range(-180.0..180.0));
            let end = GeoPoint::new(rng.gen_range(-70.0..70.0), rng.gen_range(-180.0..180.0));
            Route::between(start, end)
        })
        .collect()
}
