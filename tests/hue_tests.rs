// Host-side tests for color cycling and glow value math.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod hue {
    include!("../src/core/hue.rs");
}

use hue::*;

#[test]
fn cycle_hits_keyframes_on_period_boundaries() {
    assert!((cycle_hue(0.0) - 320.0).abs() < 1e-3);
    assert!((cycle_hue(2000.0) - 240.0).abs() < 1e-3);
    assert!((cycle_hue(4000.0) - 60.0).abs() < 1e-3);
    // Wraps back to the first keyframe.
    assert!((cycle_hue(6000.0) - 320.0).abs() < 1e-3);
}

#[test]
fn cycle_interpolates_between_neighbours() {
    // Midway pink -> blue.
    assert!((cycle_hue(1000.0) - 280.0).abs() < 0.1);
    // Midway blue -> yellow.
    assert!((cycle_hue(3000.0) - 150.0).abs() < 0.1);
}

#[test]
fn glow_values_span_their_configured_range() {
    assert!((glow_intensity(0.0) - GLOW_MIN_PX).abs() < 1e-6);
    assert!((glow_intensity(1.0) - GLOW_MAX_PX).abs() < 1e-6);
    assert!((glow_opacity(0.0) - 0.6).abs() < 1e-6);
    assert!((glow_opacity(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn box_shadow_has_three_layers() {
    let shadow = glow_box_shadow(320.0, 0.5);
    assert_eq!(shadow.matches("hsla(").count(), 3);
    assert_eq!(shadow.matches("px").count(), 3);
}

#[test]
fn title_styles_are_wellformed_hsla() {
    let shadow = title_text_shadow(240.0, 1.0);
    assert!(shadow.starts_with("0 0 20.0px hsla(240.0"));
    let color = title_color(240.0, 0.0);
    assert!(color.starts_with("hsla(240.0, 70%, 80%, 0.800"));
}

#[test]
fn hsv_to_rgb_primaries() {
    let red = hsv_to_rgb(0.0, 1.0, 1.0);
    assert!((red[0] - 1.0).abs() < 1e-6 && red[1] < 1e-6 && red[2] < 1e-6);
    let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
    assert!(green[1] > 0.999 && green[0] < 1e-5 && green[2] < 1e-6);
    let white = hsv_to_rgb(0.7, 0.0, 1.0);
    assert!(white.iter().all(|&c| (c - 1.0).abs() < 1e-6));
    // Hue wraps.
    let wrapped = hsv_to_rgb(1.5, 1.0, 1.0);
    let direct = hsv_to_rgb(0.5, 1.0, 1.0);
    for (a, b) in wrapped.iter().zip(direct.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}
