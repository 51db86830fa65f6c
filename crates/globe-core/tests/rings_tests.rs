// Host-side tests for ring pulses and view auto-rotation.

use std::time::Duration;

use glam::Vec3;
use globe_core::{GlobeSpin, Rgb, Ring, RingEmitter, GLOBE_RADIUS, MAX_RINGS, RING_INTERVAL_SEC};

fn anchors() -> Vec<(Vec3, Rgb)> {
    (0..8)
        .map(|i| (Vec3::new(i as f32, 0.0, 1.0), Rgb::WHITE))
        .collect()
}

#[test]
fn spawns_distinct_anchors_up_to_the_cap() {
    let anchors = anchors();
    let mut emitter = RingEmitter::new(GLOBE_RADIUS, 1);
    emitter.tick(Duration::from_millis(16), 0.0, &anchors);
    assert!(!emitter.rings.is_empty());
    assert!(emitter.rings.len() <= MAX_RINGS);
    for (i, a) in emitter.rings.iter().enumerate() {
        for b in &emitter.rings[i + 1..] {
            assert!(
                (a.center - b.center).length() > 1e-6,
                "duplicate ring anchor"
            );
        }
    }
}

#[test]
fn fewer_anchors_than_the_cap_spawns_fewer_rings() {
    let anchors: Vec<(Vec3, Rgb)> = vec![(Vec3::X, Rgb::WHITE)];
    let mut emitter = RingEmitter::new(GLOBE_RADIUS, 3);
    emitter.tick(Duration::from_millis(16), 0.0, &anchors);
    assert_eq!(emitter.rings.len(), 1);
}

#[test]
fn rings_grow_and_despawn_before_the_next_cadence() {
    let anchors = anchors();
    let mut emitter = RingEmitter::new(GLOBE_RADIUS, 2);
    let mut now = 0.0;
    emitter.tick(Duration::from_millis(50), now, &anchors);
    assert!(!emitter.rings.is_empty());

    now += 0.05;
    emitter.tick(Duration::from_millis(50), now, &anchors);
    let grown = emitter.rings.first().map(|r| r.radius).unwrap_or(0.0);
    assert!(grown > 0.0, "rings should expand every tick");

    for _ in 0..10 {
        now += 0.05;
        emitter.tick(Duration::from_millis(50), now, &anchors);
    }
    assert!(now < RING_INTERVAL_SEC);
    assert!(
        emitter.rings.is_empty(),
        "rings should fade out well before the next spawn"
    );
}

#[test]
fn same_seed_spawns_the_same_rings() {
    let anchors = anchors();
    let mut a = RingEmitter::new(GLOBE_RADIUS, 9);
    let mut b = RingEmitter::new(GLOBE_RADIUS, 9);
    a.tick(Duration::from_millis(16), 0.0, &anchors);
    b.tick(Duration::from_millis(16), 0.0, &anchors);
    let ca: Vec<Vec3> = a.rings.iter().map(|r| r.center).collect();
    let cb: Vec<Vec3> = b.rings.iter().map(|r| r.center).collect();
    assert_eq!(ca, cb);
}

#[test]
fn ring_alpha_fades_with_radius() {
    let ring = Ring {
        center: Vec3::X,
        radius: 0.0,
        max_radius: 1.0,
        color: Rgb::WHITE,
    };
    assert!((ring.alpha() - 1.0).abs() < 1e-6);
    let faded = Ring {
        radius: 0.9,
        ..ring
    };
    assert!(faded.alpha() < 0.2);
}

#[test]
fn spin_advances_linearly_and_wraps() {
    let mut spin = GlobeSpin {
        angle: 0.0,
        speed: 1.0,
    };
    spin.tick(Duration::from_millis(250));
    assert!((spin.angle - 0.25).abs() < 1e-4);

    spin.angle = std::f32::consts::TAU - 0.1;
    spin.tick(Duration::from_millis(250));
    assert!(spin.angle >= 0.0 && spin.angle < std::f32::consts::TAU);
    assert!((spin.angle - 0.15).abs() < 1e-4);
}
