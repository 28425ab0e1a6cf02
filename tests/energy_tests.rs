// Host-side tests for the spectrum/energy pipeline.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod energy {
    include!("../src/core/energy.rs");
}

use energy::*;

#[test]
fn band_peak_is_max_over_255() {
    let data: Vec<u8> = (0..=255).map(|i| i as u8).collect();
    assert!((band_peak(&data, 0, 256) - 1.0).abs() < 1e-6);
    assert!((band_peak(&data, 0, 4) - 3.0 / 255.0).abs() < 1e-6);
    assert!((band_peak(&data, 10, 20) - 19.0 / 255.0).abs() < 1e-6);
}

#[test]
fn band_peak_stays_in_unit_range() {
    let data = [255u8; 64];
    for start in 0..64 {
        for end in start..64 {
            let v = band_peak(&data, start, end);
            assert!((0.0..=1.0).contains(&v), "out of range at [{start},{end})");
        }
    }
}

#[test]
fn band_peak_empty_range_is_zero() {
    let data = [200u8; 32];
    assert_eq!(band_peak(&data, 5, 5), 0.0);
    assert_eq!(band_peak(&data, 9, 3), 0.0);
}

#[test]
fn band_peak_clamps_range_to_data() {
    let data = [10u8; 8];
    assert!((band_peak(&data, 0, 100) - 10.0 / 255.0).abs() < 1e-6);
    assert_eq!(band_peak(&data, 100, 200), 0.0);
}

#[test]
fn relative_energy_monotonic_in_current() {
    let baseline = 0.2;
    let peak = 0.8;
    let mut prev = relative_energy(0.0, baseline, peak);
    for i in 1..=100 {
        let current = i as f32 / 100.0;
        let rel = relative_energy(current, baseline, peak);
        assert!(rel >= prev, "not monotonic at current={current}");
        prev = rel;
    }
}

#[test]
fn relative_energy_clamped_below_baseline() {
    assert_eq!(relative_energy(0.1, 0.2, 0.8), 0.0);
}

#[test]
fn relative_energy_degenerate_span_is_zero() {
    // Silence: both statistics identical.
    assert_eq!(relative_energy(0.5, 0.3, 0.3), 0.0);
    // Baseline drifted past the peak; must not produce NaN or a negative.
    assert_eq!(relative_energy(0.5, 0.4, 0.3), 0.0);
    assert_eq!(relative_energy(0.0, 0.0, 0.0), 0.0);
}

#[test]
fn window_evicts_oldest_after_ten_pushes() {
    let mut tracker = EnergyTracker::new();
    // current = kick * 1.2 with bass/mid silent.
    let kicks: Vec<f32> = (1..=11).map(|i| i as f32 * 0.01).collect();
    for &k in &kicks {
        tracker.push(k, 0.0, 0.0);
    }
    // The first push has been evicted; the window holds pushes 2..=11.
    let expected: f32 = kicks[1..].iter().map(|k| k * 1.2).sum::<f32>() / 10.0;
    assert!(
        (tracker.average() - expected).abs() < 1e-5,
        "average {} != {}",
        tracker.average(),
        expected
    );
}

#[test]
fn average_tracks_window_mean_each_push() {
    let mut tracker = EnergyTracker::new();
    let mut window = vec![0.0f32; 10];
    for i in 0..25 {
        let kick = (i as f32 * 0.7).sin().abs() * 0.5;
        tracker.push(kick, 0.0, 0.0);
        window[i % 10] = kick * 1.2;
        let expected: f32 = window.iter().sum::<f32>() / 10.0;
        assert!((tracker.average() - expected).abs() < 1e-5);
    }
}

#[test]
fn spike_then_silence_decays_without_going_negative() {
    let mut tracker = EnergyTracker::new();
    let mut out = Vec::new();
    // current sequence [0, 0, 0, 0.9, 0, 0, ...]
    for i in 0..20 {
        let kick = if i == 3 { 0.75 } else { 0.0 };
        out.push(tracker.push(kick, 0.0, 0.0));
    }
    for (i, v) in out.iter().enumerate() {
        assert!(*v >= 0.0, "negative output at {i}");
        assert!(*v <= 1.0, "output above 1 at {i}");
    }
    assert!(out[3] > 0.9, "spike not registered: {}", out[3]);
    for (i, v) in out.iter().enumerate().skip(4) {
        assert!(*v < 0.05, "did not settle after spike at {i}: {v}");
    }
    // Statistics decayed rather than latched.
    assert!(tracker.peak() < 0.9);
}

#[test]
fn reset_clears_all_statistics() {
    let mut tracker = EnergyTracker::new();
    for _ in 0..50 {
        tracker.push(0.8, 0.6, 0.4);
    }
    assert!(tracker.peak() > 0.0);
    tracker.reset();
    assert_eq!(tracker.peak(), 0.0);
    assert_eq!(tracker.baseline(), 0.0);
    assert_eq!(tracker.average(), 0.0);
    assert_eq!(tracker.push(0.0, 0.0, 0.0), 0.0);
}
