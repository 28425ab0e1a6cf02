use rand::Rng;

/// Chance that one pointer-move event sheds an ember while audio plays.
pub const EMBER_SPAWN_PROBABILITY: f32 = 0.3;

/// One cursor-shed spark: rises as it dies, swaying on its own sinusoid.
pub struct Ember {
    pub x: f32,
    pub y: f32,
    origin_x: f32,
    origin_y: f32,
    phase: f32,
    sway_rate: f32,
    pub life: f32,
    decay: f32,
}

impl Ember {
    pub fn spawn(rng: &mut impl Rng, x: f32, y: f32) -> Self {
        Self::with_params(
            x,
            y,
            rng.gen::<f32>() * std::f32::consts::TAU,
            rng.gen::<f32>() * 2.0 + 1.0,
            rng.gen::<f32>() * 0.02 + 0.02,
        )
    }

    pub fn with_params(x: f32, y: f32, phase: f32, sway_rate: f32, decay: f32) -> Self {
        Self {
            x,
            y,
            origin_x: x,
            origin_y: y,
            phase,
            sway_rate,
            life: 1.0,
            decay,
        }
    }

    /// Advance one frame. Returns false once the ember is spent; the caller
    /// releases its render resource that same frame.
    pub fn tick(&mut self) -> bool {
        self.life -= self.decay;
        let spent = 1.0 - self.life;
        self.y = self.origin_y - spent * 100.0;
        self.x = self.origin_x + (self.phase + spent * self.sway_rate).sin() * 10.0 * spent;
        self.life > 0.0
    }
}
