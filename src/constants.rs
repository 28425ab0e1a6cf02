// Shared tuning constants for the page glue. Simulation-level numbers live
// next to their logic in `core/`.

// Frequency analysis configuration (512-point transform -> 256 bins).
pub const FFT_SIZE: u32 = 512;
pub const ANALYSER_SMOOTHING: f64 = 0.2;

// Energy handed to the active path/particle effect is boosted relative to
// the CSS glow so bolts and fog stay lively at moderate volume.
pub const EFFECT_ENERGY_SCALE: f32 = 1.5;

// Album shake at full normalized energy, in px.
pub const SHAKE_MAX_PX: f32 = 4.0;

// Glow radius relative to the larger artwork dimension.
pub const GLOW_RADIUS_FACTOR: f32 = 1.5;

// Error banner lifetime.
pub const BANNER_VISIBLE_MS: i32 = 5000;
pub const BANNER_FADE_MS: i32 = 1000;

// Clock loop.
pub const CLOCK_TICK_MS: i32 = 50;
pub const CLOCK_FADE_AFTER_SECS: u32 = 15;
pub const CLOCK_GLITCH_DEG: f32 = 10.0;
pub const CLOCK_MINUTE_GLITCH_THRESHOLD: f32 = 0.7;

// Breakdown / message pacing.
pub const BREAKDOWN_TICK_MS: i32 = 1000;
pub const FIRST_MESSAGE_DELAY_MS: i32 = 2000;

// Default glow restored when playback stops.
pub const IDLE_GLOW_BOX_SHADOW: &str = "0 0 80px rgba(255, 0, 0, 0.5)";
