// Time-based color cycling and the CSS glow values derived from it.
// The palette runs pink -> blue -> yellow on a fixed period, with linear
// interpolation between neighbours.

pub const HUE_KEYFRAMES: [f32; 3] = [320.0, 240.0, 60.0];
pub const HUE_CYCLE_MS: f64 = 2000.0;

// Saturation/lightness shared by all glow colors.
pub const GLOW_SATURATION: f32 = 100.0;
pub const GLOW_LIGHTNESS: f32 = 50.0;

pub const GLOW_MIN_PX: f32 = 20.0;
pub const GLOW_MAX_PX: f32 = 150.0;

/// Hue (degrees) for a wall-clock timestamp, interpolated along the cycle.
pub fn cycle_hue(now_ms: f64) -> f32 {
    let slot = ((now_ms / HUE_CYCLE_MS) as i64).rem_euclid(HUE_KEYFRAMES.len() as i64) as usize;
    let next = (slot + 1) % HUE_KEYFRAMES.len();
    let progress = ((now_ms.rem_euclid(HUE_CYCLE_MS)) / HUE_CYCLE_MS) as f32;
    HUE_KEYFRAMES[slot] + (HUE_KEYFRAMES[next] - HUE_KEYFRAMES[slot]) * progress
}

/// Glow radius in px for a normalized energy value.
pub fn glow_intensity(normalized: f32) -> f32 {
    GLOW_MIN_PX + (GLOW_MAX_PX - GLOW_MIN_PX) * normalized
}

/// Glow opacity for a normalized energy value.
pub fn glow_opacity(normalized: f32) -> f32 {
    0.6 + normalized * 0.4
}

/// Three nested shadow layers at different blur radii; the tight inner layer
/// defines the edge, the wide outer one the halo.
pub fn glow_box_shadow(hue: f32, normalized: f32) -> String {
    let intensity = glow_intensity(normalized);
    let opacity = glow_opacity(normalized);
    let layer = |radius: f32, alpha: f32| {
        format!(
            "0 0 {:.1}px hsla({:.1}, {}%, {}%, {:.3})",
            radius, hue, GLOW_SATURATION, GLOW_LIGHTNESS, alpha
        )
    };
    format!(
        "{}, {}, {}",
        layer(intensity * 0.4, opacity * 0.8),
        layer(intensity * 0.7, opacity * 0.5),
        layer(intensity, opacity * 0.3)
    )
}

pub fn title_text_shadow(hue: f32, normalized: f32) -> String {
    let radius = 5.0 + normalized * 15.0;
    format!(
        "0 0 {:.1}px hsla({:.1}, {}%, {}%, {:.3})",
        radius,
        hue,
        GLOW_SATURATION,
        GLOW_LIGHTNESS,
        glow_opacity(normalized)
    )
}

pub fn title_color(hue: f32, normalized: f32) -> String {
    format!(
        "hsla({:.1}, 70%, 80%, {:.3})",
        hue,
        0.8 + normalized * 0.2
    )
}

/// HSV -> linear RGB, all components in [0, 1]. Used for sprite tints; CSS
/// paths keep hsla() strings instead.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as i32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
