// Host-side tests for the fog simulation and its failure state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod hue {
    include!("../src/core/hue.rs");
}
mod fog {
    include!("../src/core/fog.rs");
}

use fog::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_sim(seed: u64) -> FogSim {
    let mut rng = StdRng::seed_from_u64(seed);
    FogSim::new(&mut rng, Vec2::new(960.0, 540.0), 300.0)
}

#[test]
fn layers_spawn_with_decreasing_population() {
    let sim = make_sim(7);
    assert_eq!(sim.layers.len(), FOG_LAYER_COUNT);
    let counts: Vec<usize> = sim.layers.iter().map(Vec::len).collect();
    assert_eq!(counts, vec![200, 175, 150, 125]);
    assert_eq!(sim.particle_count(), 650);
}

#[test]
fn layer_parameters_fall_off_with_depth() {
    assert!((layer_base_alpha(0) - 0.6).abs() < 1e-6);
    assert!((layer_base_alpha(3) - 0.3).abs() < 1e-6);
    assert!((layer_base_scale(0) - 150.0).abs() < 1e-6);
    assert!((layer_base_scale(3) - 300.0).abs() < 1e-6);
}

#[test]
fn particles_stay_bounded_by_respawn() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut sim = make_sim(11);
    let center = sim.center();
    let bound = sim.glow_radius() * 2.0;
    for _ in 0..200 {
        sim.update(&mut rng, 0.9, 180.0);
        for layer in &sim.layers {
            for p in layer {
                // Motion this frame is tiny compared to the bound; anything
                // that crossed it was respawned inside the glow radius.
                assert!(p.pos.distance(center) <= bound + 1.0);
            }
        }
    }
}

#[test]
fn update_keeps_alpha_and_scale_sane() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut sim = make_sim(3);
    for _ in 0..50 {
        sim.update(&mut rng, 1.0, 320.0);
    }
    for layer in &sim.layers {
        for p in layer {
            assert!(p.alpha <= 1.0 && p.alpha >= 0.0);
            assert!(p.scale >= p.base_scale * 0.99);
            for c in p.tint {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}

#[test]
fn resize_recenters_without_resetting_particles() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut sim = make_sim(42);
    sim.update(&mut rng, 0.5, 60.0);
    let before: Vec<Vec2> = sim.layers[0].iter().map(|p| p.pos).collect();

    sim.set_focus(Vec2::new(400.0, 300.0), 450.0);

    assert_eq!(sim.center(), Vec2::new(400.0, 300.0));
    assert_eq!(sim.glow_radius(), 450.0);
    let after: Vec<Vec2> = sim.layers[0].iter().map(|p| p.pos).collect();
    assert_eq!(before, after, "in-flight particles must not reset on resize");
    assert_eq!(sim.particle_count(), 650);
}

#[test]
fn context_loss_clears_and_repopulates() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut sim = make_sim(5);
    sim.clear();
    assert_eq!(sim.particle_count(), 0);
    sim.populate(&mut rng);
    assert_eq!(sim.particle_count(), 650);
}

#[test]
fn three_failures_demote_exactly_once() {
    let mut condition = FogCondition::new();
    assert!(!condition.record_failure());
    assert!(!condition.record_failure());
    assert_eq!(condition.phase(), FogPhase::Active);

    // Third failure crosses the threshold and triggers the fallback.
    assert!(condition.record_failure());
    assert_eq!(condition.phase(), FogPhase::Degraded);

    // A fourth failure must not re-trigger fallback setup.
    assert!(!condition.record_failure());
    assert_eq!(condition.phase(), FogPhase::Degraded);
}

#[test]
fn successful_creation_resets_failure_streak() {
    let mut condition = FogCondition::new();
    condition.record_failure();
    condition.record_failure();
    condition.mark_healthy();
    assert_eq!(condition.failure_count(), 0);
    assert!(!condition.record_failure());
    assert!(!condition.record_failure());
    assert_eq!(condition.phase(), FogPhase::Active);
}

#[test]
fn context_loss_is_transient_and_dispose_is_terminal() {
    let mut condition = FogCondition::new();
    condition.lose_context();
    assert!(condition.context_lost());
    condition.restore_context();
    assert!(!condition.context_lost());
    assert_eq!(condition.phase(), FogPhase::Active);

    condition.dispose();
    assert_eq!(condition.phase(), FogPhase::Disposed);
    assert!(!condition.record_failure());
    condition.lose_context();
    assert!(!condition.context_lost());
}
