use super::hue::hsv_to_rgb;
use glam::Vec2;
use rand::Rng;

// Layer population falls off with depth so the nearest layer reads densest.
pub const FOG_LAYER_COUNT: usize = 4;

pub fn layer_particle_count(layer: usize) -> usize {
    200 - layer * 25
}

pub fn layer_base_alpha(layer: usize) -> f32 {
    (0.6 - layer as f32 * 0.1).min(0.6)
}

pub fn layer_base_scale(layer: usize) -> f32 {
    150.0 + layer as f32 * 50.0
}

/// Consecutive update/construction failures tolerated before the effect
/// demotes itself to the gradient fallback.
pub const MAX_FOG_FAILURES: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FogPhase {
    Active,
    Degraded,
    Disposed,
}

/// Failure/teardown state machine for the fog effect. `Degraded` is entered
/// at most once; `Disposed` is terminal.
pub struct FogCondition {
    phase: FogPhase,
    failure_count: u32,
    context_lost: bool,
}

impl Default for FogCondition {
    fn default() -> Self {
        Self::new()
    }
}

impl FogCondition {
    pub fn new() -> Self {
        Self {
            phase: FogPhase::Active,
            failure_count: 0,
            context_lost: false,
        }
    }

    pub fn phase(&self) -> FogPhase {
        self.phase
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    pub fn context_lost(&self) -> bool {
        self.context_lost
    }

    /// Counts one failure. Returns true exactly when this failure crosses
    /// the threshold and demotes the effect; later failures are no-ops.
    pub fn record_failure(&mut self) -> bool {
        if self.phase != FogPhase::Active {
            return false;
        }
        self.failure_count += 1;
        if self.failure_count >= MAX_FOG_FAILURES {
            self.phase = FogPhase::Degraded;
            true
        } else {
            false
        }
    }

    /// A successful (re)construction clears the failure streak.
    pub fn mark_healthy(&mut self) {
        if self.phase == FogPhase::Active {
            self.failure_count = 0;
        }
    }

    pub fn lose_context(&mut self) {
        if self.phase == FogPhase::Active {
            self.context_lost = true;
        }
    }

    pub fn restore_context(&mut self) {
        self.context_lost = false;
    }

    pub fn dispose(&mut self) {
        self.phase = FogPhase::Disposed;
    }
}

/// One drifting glow sprite. Owned by exactly one layer; never reparented.
pub struct FogParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub base_alpha: f32,
    pub alpha: f32,
    pub base_scale: f32,
    pub scale: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub oscillation_speed: f32,
    pub oscillation_amplitude: f32,
    pub phase: f32,
    /// Sinusoidal lateral offset applied at draw time.
    pub wobble: f32,
    pub tint: [f32; 3],
}

impl FogParticle {
    pub fn spawn(
        rng: &mut impl Rng,
        center: Vec2,
        glow_radius: f32,
        base_alpha: f32,
        layer_scale: f32,
    ) -> Self {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let distance = rng.gen::<f32>() * glow_radius * 2.0;
        let base_scale = (rng.gen::<f32>() * 0.5 + 1.0) * layer_scale;
        Self {
            pos: center + Vec2::new(angle.cos(), angle.sin()) * distance,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 0.05,
                (rng.gen::<f32>() - 0.5) * 0.05,
            ),
            angle,
            base_alpha,
            alpha: base_alpha,
            base_scale,
            scale: base_scale,
            rotation: rng.gen::<f32>() * std::f32::consts::TAU,
            rotation_speed: (rng.gen::<f32>() - 0.5) * 0.001,
            oscillation_speed: rng.gen::<f32>() * 0.002,
            oscillation_amplitude: rng.gen::<f32>() * 100.0,
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
            wobble: 0.0,
            tint: [1.0, 1.0, 1.0],
        }
    }
}

/// Pure simulation of the layered fog cloud around a focal point. The
/// renderer only reads particle state; all motion lives here.
pub struct FogSim {
    center: Vec2,
    glow_radius: f32,
    pub layers: Vec<Vec<FogParticle>>,
}

impl FogSim {
    pub fn new(rng: &mut impl Rng, center: Vec2, glow_radius: f32) -> Self {
        let mut sim = Self {
            center,
            glow_radius,
            layers: Vec::new(),
        };
        sim.populate(rng);
        sim
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn glow_radius(&self) -> f32 {
        self.glow_radius
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Fill all layers from scratch. Also used on context restore.
    pub fn populate(&mut self, rng: &mut impl Rng) {
        let center = self.center;
        let glow_radius = self.glow_radius;
        self.layers = (0..FOG_LAYER_COUNT)
            .map(|layer| {
                let alpha = layer_base_alpha(layer);
                let scale = layer_base_scale(layer);
                (0..layer_particle_count(layer))
                    .map(|_| FogParticle::spawn(rng, center, glow_radius, alpha, scale))
                    .collect()
            })
            .collect();
    }

    /// Context loss drops particle ownership without tearing the sim down.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Re-center on the artwork after a resize. In-flight particles keep
    /// their positions; only the focal point and bound move.
    pub fn set_focus(&mut self, center: Vec2, glow_radius: f32) {
        self.center = center;
        self.glow_radius = glow_radius;
    }

    pub fn update(&mut self, rng: &mut impl Rng, energy: f32, hue: f32) {
        let center = self.center;
        let glow_radius = self.glow_radius;
        for (layer_index, layer) in self.layers.iter_mut().enumerate() {
            for p in layer.iter_mut() {
                p.phase += p.oscillation_speed;
                p.angle += (0.001 + energy * 0.002) * (1.0 - layer_index as f32 * 0.05);
                p.wobble = p.phase.sin() * p.oscillation_amplitude * (energy + 0.5);
                p.pos += p.vel * (1.0 + energy * 3.0);
                p.rotation += p.rotation_speed * (1.0 + energy * 3.0);

                let distance = p.pos.distance(center);
                if distance > glow_radius * 2.0 {
                    // Respawn inside the glow bound; keeps the cloud tied to
                    // the focal point without real physics.
                    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
                    let dist = rng.gen::<f32>() * glow_radius;
                    p.pos = center + Vec2::new(angle.cos(), angle.sin()) * dist;
                }

                let glow = (1.0 - distance / glow_radius).max(0.0);
                let boost = energy * 3.0;
                p.alpha = (p.base_alpha + glow * boost).min(1.0);
                p.scale = p.base_scale * (1.0 + glow * boost);
                p.tint = hsv_to_rgb(
                    hue / 360.0,
                    (0.9 * glow + energy * 0.5).min(1.0),
                    1.0,
                );
            }
        }
    }
}
