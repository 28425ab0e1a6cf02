// Host-side tests for ghost-message placement.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod placement {
    include!("../src/core/placement.rs");
}

use placement::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const VIEW_W: f32 = 1920.0;
const VIEW_H: f32 = 1080.0;

fn centered_artwork() -> Rect {
    Rect {
        left: 760.0,
        top: 440.0,
        width: 400.0,
        height: 200.0,
    }
}

#[test]
fn found_spots_stay_on_screen() {
    let artwork = centered_artwork();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some((x, y)) = find_spot(&mut rng, VIEW_W, VIEW_H, artwork) {
            assert!(x >= 0.0 && x <= VIEW_W - MESSAGE_WIDTH, "x out of bounds: {x}");
            assert!(y >= 0.0 && y <= VIEW_H - MESSAGE_HEIGHT, "y out of bounds: {y}");
        }
    }
}

#[test]
fn found_spots_avoid_the_forbidden_zone() {
    let artwork = centered_artwork();
    let zone_left = artwork.left - SAFE_DISTANCE;
    let zone_right = artwork.right() + SAFE_DISTANCE;
    let zone_top = artwork.top - SAFE_DISTANCE;
    let zone_bottom = artwork.bottom() + SAFE_DISTANCE;

    let mut found = 0;
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some((x, y)) = find_spot(&mut rng, VIEW_W, VIEW_H, artwork) {
            found += 1;
            let inside_zone =
                x > zone_left && x < zone_right && y > zone_top && y < zone_bottom;
            assert!(!inside_zone, "({x}, {y}) landed inside the forbidden zone");
        }
    }
    assert!(found > 150, "search should almost always succeed: {found}");
}

#[test]
fn gives_up_when_no_room_exists() {
    // Artwork covers the whole viewport; every quadrant span collapses.
    let artwork = Rect {
        left: 0.0,
        top: 0.0,
        width: VIEW_W,
        height: VIEW_H,
    };
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(find_spot(&mut rng, VIEW_W, VIEW_H, artwork), None);
    }
}

#[test]
fn rect_edges_derive_from_origin_and_size() {
    let r = centered_artwork();
    assert_eq!(r.right(), 1160.0);
    assert_eq!(r.bottom(), 640.0);
}
