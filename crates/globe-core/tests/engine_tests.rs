// Host-side integration tests for the arc animation engine.

use std::time::Duration;

use globe_core::{
    demo_routes, random_routes, ArcEngine, EngineParams, GeoPoint, Palette, Rgb, Route,
    ARC_SAMPLES,
};

fn make_engine() -> ArcEngine {
    ArcEngine::new(demo_routes(), EngineParams::default())
}

#[test]
fn demo_catalog_resolves_every_route() {
    let engine = make_engine();
    assert_eq!(engine.arcs.len(), 12);
    for arc in &engine.arcs {
        assert_eq!(arc.points.len(), ARC_SAMPLES + 1);
        assert_eq!(arc.dot_count(), 2);
        assert!(arc.dash_offset == 0.0);
    }
}

#[test]
fn dash_offset_accumulates_linearly() {
    let mut engine = make_engine();
    let dt = Duration::from_secs_f64(1.0 / 60.0);
    let mut out = Vec::new();
    let steps = 120;
    for step in 0..steps {
        out.clear();
        engine.tick(dt, step as f64 / 60.0, &mut out);
    }
    let expected = -(steps as f32) * (1.0 / 60.0) * engine.params.dash_speed;
    for arc in &engine.arcs {
        assert!(
            (arc.dash_offset - expected).abs() < 1e-3,
            "dash offset {} after {steps} ticks, expected {expected}",
            arc.dash_offset
        );
    }
}

#[test]
fn dot_phases_are_distinct_and_evenly_spaced() {
    let mut route = Route::between(GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 60.0));
    route.dot_count = Some(4);
    let mut engine = ArcEngine::new(vec![route], EngineParams::default());
    let mut out = Vec::new();
    engine.tick(Duration::from_millis(16), 12.345, &mut out);
    assert_eq!(out.len(), 4);

    let mut phases: Vec<f32> = out.iter().map(|d| d.phase).collect();
    phases.sort_by(f32::total_cmp);
    for pair in phases.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((gap - 0.25).abs() < 1e-4, "uneven phase gap {gap}");
    }
}

#[test]
fn dots_ride_the_cached_curve() {
    let mut engine = make_engine();
    let mut out = Vec::new();
    engine.tick(Duration::from_millis(16), 3.5, &mut out);
    assert_eq!(out.len(), engine.arcs.len() * 2);
    for dot in &out {
        let arc = &engine.arcs[dot.arc_index];
        let expected = arc.curve.point_at(dot.phase);
        assert!((dot.position - expected).length() < 1e-6);
        assert!(dot.phase >= 0.0 && dot.phase < 1.0);
    }
}

#[test]
fn identical_endpoints_collapse_to_a_radial_segment() {
    let here = GeoPoint::new(46.8139, -71.208);
    let mut engine = ArcEngine::new(vec![Route::between(here, here)], EngineParams::default());
    let dir = engine.arcs[0].start.normalize();
    let radius = engine.params.radius;
    let mut out = Vec::new();
    for step in 0..30 {
        out.clear();
        engine.tick(Duration::from_millis(33), 0.033 * step as f64, &mut out);
        for dot in &out {
            let along = dot.position.dot(dir);
            let off_axis = (dot.position - dir * along).length();
            assert!(off_axis < 1e-4, "dot left the degenerate arc's axis");
            assert!(along >= radius - 1e-3 && along <= 1.3 * radius + 1e-3);
        }
    }
}

#[test]
fn palette_cycles_by_route_index() {
    let engine = make_engine();
    let palette = Palette::default();
    for (i, arc) in engine.arcs.iter().enumerate() {
        assert_eq!(arc.color, palette.color_for(i));
    }
    // 12 routes over a 5-color palette wrap around
    assert_eq!(engine.arcs[5].color, engine.arcs[0].color);
}

#[test]
fn explicit_route_color_wins_over_the_palette() {
    let mut route = Route::between(GeoPoint::new(0.0, 0.0), GeoPoint::new(20.0, 20.0));
    let red = Rgb {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    route.color = Some(red);
    let engine = ArcEngine::new(vec![route], EngineParams::default());
    assert_eq!(engine.arcs[0].color, red);
}

#[test]
fn radius_change_rebuilds_cached_arcs() {
    let mut engine = make_engine();
    engine.set_radius(5.0);
    for arc in &engine.arcs {
        assert!((arc.start.length() - 5.0).abs() < 1e-3);
        assert!((arc.end.length() - 5.0).abs() < 1e-3);
        assert_eq!(arc.points.len(), ARC_SAMPLES + 1);
    }
}

#[test]
fn route_list_replacement_rebuilds_arcs() {
    let mut engine = make_engine();
    engine.set_routes(vec![Route::between(
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(45.0, 45.0),
    )]);
    assert_eq!(engine.arcs.len(), 1);
    assert_eq!(engine.routes().len(), 1);
}

#[test]
fn zero_dot_routes_emit_nothing() {
    let mut route = Route::between(GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0));
    route.dot_count = Some(0);
    let mut engine = ArcEngine::new(vec![route], EngineParams::default());
    let mut out = Vec::new();
    engine.tick(Duration::from_millis(16), 1.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn random_routes_are_deterministic_per_seed() {
    let a = random_routes(25, 7);
    let b = random_routes(25, 7);
    assert_eq!(a.len(), 25);
    for (ra, rb) in a.iter().zip(&b) {
        assert_eq!(ra.start, rb.start);
        assert_eq!(ra.end, rb.end);
        assert!(ra.start.lat > -70.0 && ra.start.lat < 70.0);
    }
}
