use rand::Rng;

/// Minimum clearance kept between a message and the artwork.
pub const SAFE_DISTANCE: f32 = 150.0;
/// Placement attempts before giving up on this reveal.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;
// Room reserved so the message box itself stays on screen.
pub const MESSAGE_WIDTH: f32 = 200.0;
pub const MESSAGE_HEIGHT: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Search for a message position in one of the four quadrants around the
/// artwork, outside its inflated forbidden zone and inside the viewport.
/// Returns None when the attempt budget runs out (caller skips the reveal).
pub fn find_spot(
    rng: &mut impl Rng,
    viewport_w: f32,
    viewport_h: f32,
    artwork: Rect,
) -> Option<(f32, f32)> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let (x, y) = match rng.gen_range(0..4u32) {
            // Above
            0 => (
                rng.gen::<f32>() * viewport_w,
                rng.gen::<f32>() * (artwork.top - SAFE_DISTANCE),
            ),
            // Right of
            1 => {
                let edge = artwork.right() + SAFE_DISTANCE;
                (
                    edge + rng.gen::<f32>() * (viewport_w - edge),
                    rng.gen::<f32>() * viewport_h,
                )
            }
            // Below
            2 => {
                let edge = artwork.bottom() + SAFE_DISTANCE;
                (
                    rng.gen::<f32>() * viewport_w,
                    edge + rng.gen::<f32>() * (viewport_h - edge),
                )
            }
            // Left of
            _ => (
                rng.gen::<f32>() * (artwork.left - SAFE_DISTANCE),
                rng.gen::<f32>() * viewport_h,
            ),
        };

        // Quadrant spans collapse to negative values when the artwork sits
        // against an edge; those candidates land out of bounds and retry.
        let in_bounds = x >= 0.0
            && x <= viewport_w - MESSAGE_WIDTH
            && y >= 0.0
            && y <= viewport_h - MESSAGE_HEIGHT;
        if in_bounds {
            return Some((x, y));
        }
    }
    None
}
