// Host-side tests for energy-path generation and aging.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod bolt {
    include!("../src/core/bolt.rs");
}

use bolt::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;

fn fixed_path(birth_ms: f64, lifetime_ms: f64) -> EnergyPath {
    EnergyPath {
        points: vec![Vec2::ZERO, Vec2::new(10.0, 10.0)],
        hue: MAGENTA_HUE,
        width: 1.0,
        birth_ms,
        lifetime_ms,
        branches: Vec::new(),
    }
}

#[test]
fn path_alive_at_149_gone_at_151() {
    let t0 = 5000.0;
    let path = fixed_path(t0, 150.0);
    assert!(!path.expired(t0 + 149.0));
    assert!(path.alpha(t0 + 149.0) > 0.0);
    assert!(path.expired(t0 + 151.0));
}

#[test]
fn alpha_fades_linearly_with_age() {
    let path = fixed_path(0.0, 200.0);
    assert!((path.alpha(0.0) - 1.0).abs() < 1e-6);
    assert!((path.alpha(100.0) - 0.5).abs() < 1e-6);
    assert!((path.alpha(200.0) - 0.0).abs() < 1e-6);
    // Past end of life it clamps rather than going negative.
    assert_eq!(path.alpha(500.0), 0.0);
}

#[test]
fn sim_reaps_expired_paths() {
    let mut sim = BoltSim::new(Vec2::new(500.0, 400.0), 150.0);
    sim.paths.push(fixed_path(1000.0, 150.0));
    let mut rng = StdRng::seed_from_u64(1);

    sim.step(&mut rng, 0.0, 1149.0);
    assert_eq!(sim.paths.len(), 1);
    sim.step(&mut rng, 0.0, 1151.0);
    assert!(sim.paths.is_empty());
}

#[test]
fn no_spawn_at_or_below_energy_threshold() {
    let mut sim = BoltSim::new(Vec2::ZERO, 100.0);
    let mut rng = StdRng::seed_from_u64(2);
    sim.step(&mut rng, 0.0, 1000.0);
    sim.step(&mut rng, 0.3, 2000.0);
    assert!(sim.paths.is_empty());
}

#[test]
fn spawn_gate_blocks_until_delay_elapses() {
    let mut sim = BoltSim::new(Vec2::new(500.0, 400.0), 150.0);
    let mut rng = StdRng::seed_from_u64(3);

    // First spawn: well past the (empty) history.
    sim.step(&mut rng, 1.0, 1000.0);
    assert_eq!(sim.paths.len(), 1);
    let first_birth = sim.paths[0].birth_ms;
    assert_eq!(first_birth, 1000.0);

    // 50 ms later: under the 400 ms gate at full energy, nothing new.
    sim.step(&mut rng, 1.0, 1050.0);
    assert_eq!(sim.paths.len(), 1);
    assert_eq!(sim.paths[0].birth_ms, first_birth);

    // Past the gate: a new bolt appears (the old one has aged out by now,
    // lifetimes cap below 300 ms).
    sim.step(&mut rng, 1.0, 1401.0);
    assert_eq!(sim.paths.len(), 1);
    assert_eq!(sim.paths[0].birth_ms, 1401.0);
}

#[test]
fn trunk_segments_scale_with_energy() {
    let center = Vec2::new(300.0, 300.0);
    let mut rng = StdRng::seed_from_u64(4);
    let low = generate_path(&mut rng, center, 100.0, 0.4, 0.0);
    assert_eq!(low.points.len(), 4 + 1); // 3 + floor(0.4 * 4) segments
    let high = generate_path(&mut rng, center, 100.0, 1.0, 0.0);
    assert_eq!(high.points.len(), 7 + 1);
}

#[test]
fn generated_paths_start_on_focal_circle() {
    let center = Vec2::new(300.0, 300.0);
    let radius = 120.0;
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generate_path(&mut rng, center, radius, 0.8, 0.0);
        let start = path.points[0];
        assert!((start.distance(center) - radius).abs() < 1e-3);
        assert!((100.0..300.0).contains(&path.lifetime_ms));
        assert!(path.hue == MAGENTA_HUE || path.hue == CYAN_HUE);
        assert!((path.width - 1.3).abs() < 1e-6);
    }
}

#[test]
fn branches_are_bounded_and_thinner_than_trunk() {
    // Depth caps at 2, so width never drops below width * (0.6 - 2 * 0.2).
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generate_path(&mut rng, Vec2::ZERO, 100.0, 1.0, 0.0);
        for branch in &path.branches {
            assert!(branch.width < path.width);
            assert!(branch.width >= path.width * 0.2 - 1e-6);
            // Two endpoints plus one or two midpoints.
            assert!(branch.points.len() == 3 || branch.points.len() == 4);
        }
    }
}

#[test]
fn branch_points_are_smallvec_backed() {
    let points: SmallVec<[Vec2; 6]> = SmallVec::from_slice(&[Vec2::ZERO, Vec2::ONE]);
    let branch = Branch { points, width: 0.5 };
    assert!(!branch.points.spilled());
}

#[test]
fn refocus_keeps_inflight_paths() {
    let mut sim = BoltSim::new(Vec2::ZERO, 100.0);
    sim.paths.push(fixed_path(0.0, 10_000.0));
    sim.set_focus(Vec2::new(50.0, 50.0), 200.0);
    assert_eq!(sim.paths.len(), 1);
    assert_eq!(sim.center(), Vec2::new(50.0, 50.0));
}
