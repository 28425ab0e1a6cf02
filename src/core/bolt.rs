use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

// Spawn pacing. A louder frame shortens the minimum re-spawn interval.
pub const SPAWN_DELAY_MS: f64 = 400.0;
pub const SPAWN_ENERGY_THRESHOLD: f32 = 0.3;

pub const MAX_BRANCH_DEPTH: u32 = 2;

pub const MAGENTA_HUE: f32 = 300.0;
pub const CYAN_HUE: f32 = 180.0;

/// A short side polyline hanging off a trunk point. Branches never outlive
/// their parent path and are never stored independently.
pub struct Branch {
    pub points: SmallVec<[Vec2; 6]>,
    pub width: f32,
}

/// One lightning-like burst: a polyline trunk plus its branches, fading out
/// over a bounded lifetime.
pub struct EnergyPath {
    pub points: Vec<Vec2>,
    pub hue: f32,
    pub width: f32,
    pub birth_ms: f64,
    pub lifetime_ms: f64,
    pub branches: Vec<Branch>,
}

impl EnergyPath {
    /// Alpha is a pure function of age; 1 at birth, 0 at end of life.
    pub fn alpha(&self, now_ms: f64) -> f32 {
        (1.0 - (now_ms - self.birth_ms) / self.lifetime_ms).clamp(0.0, 1.0) as f32
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.birth_ms > self.lifetime_ms
    }
}

/// Generates and ages bolts around a focal circle. Rendering is left to the
/// owning effect; this only owns geometry and timing.
pub struct BoltSim {
    center: Vec2,
    radius: f32,
    last_spawn_ms: f64,
    pub paths: Vec<EnergyPath>,
}

impl BoltSim {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            last_spawn_ms: 0.0,
            paths: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Re-center on the artwork after a resize; in-flight bolts are kept.
    pub fn set_focus(&mut self, center: Vec2, radius: f32) {
        self.center = center;
        self.radius = radius;
    }

    /// One frame: possibly spawn, then reap expired paths.
    pub fn step(&mut self, rng: &mut impl Rng, energy: f32, now_ms: f64) {
        if energy > SPAWN_ENERGY_THRESHOLD {
            self.try_spawn(rng, energy, now_ms);
        }
        self.paths.retain(|p| !p.expired(now_ms));
    }

    fn try_spawn(&mut self, rng: &mut impl Rng, energy: f32, now_ms: f64) {
        // Gate is only reached above the energy threshold, so the division
        // never sees a vanishing energy.
        if now_ms - self.last_spawn_ms < SPAWN_DELAY_MS / f64::from(energy) {
            return;
        }
        self.last_spawn_ms = now_ms;
        let path = generate_path(rng, self.center, self.radius, energy, now_ms);
        self.paths.push(path);
    }
}

/// Walk a jagged trunk out from a random point on the focal circle,
/// sprouting branches along the way.
pub fn generate_path(
    rng: &mut impl Rng,
    center: Vec2,
    radius: f32,
    energy: f32,
    now_ms: f64,
) -> EnergyPath {
    let start_angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let start = center + Vec2::new(start_angle.cos(), start_angle.sin()) * radius;

    let mut path = EnergyPath {
        points: vec![start],
        hue: if rng.gen::<f32>() < 0.5 {
            MAGENTA_HUE
        } else {
            CYAN_HUE
        },
        width: 0.5 + energy,
        birth_ms: now_ms,
        lifetime_ms: f64::from(rng.gen::<f32>()) * 200.0 + 100.0,
        branches: Vec::new(),
    };

    let segments = (3.0 + energy * 4.0) as usize;
    let mut cursor = start;
    let mut angle = start_angle;
    for _ in 0..segments {
        angle += (rng.gen::<f32>() - 0.5) * std::f32::consts::TAU;
        let length = (30.0 + rng.gen::<f32>() * 80.0) * (1.0 + energy);
        cursor += Vec2::new(angle.cos(), angle.sin()) * length;
        path.points.push(cursor);

        if rng.gen::<f32>() < 0.4 * energy {
            grow_branch(rng, &mut path, cursor, angle, energy, 0);
        }
    }

    path
}

/// Recursive branch growth, bounded by `MAX_BRANCH_DEPTH`. Each level is
/// shorter and thinner, and less likely to fork again.
fn grow_branch(
    rng: &mut impl Rng,
    path: &mut EnergyPath,
    from: Vec2,
    angle: f32,
    energy: f32,
    depth: u32,
) {
    if depth > MAX_BRANCH_DEPTH {
        return;
    }

    let branch_angle = angle + (rng.gen::<f32>() - 0.5) * std::f32::consts::PI * 1.5;
    let length = (20.0 + rng.gen::<f32>() * 50.0) * (1.0 + energy) * (1.0 - depth as f32 * 0.3);
    let end = from + Vec2::new(branch_angle.cos(), branch_angle.sin()) * length;

    let mut points: SmallVec<[Vec2; 6]> = SmallVec::new();
    points.push(from);

    // One or two perpendicular-offset midpoints keep the segment organic.
    let midpoints = rng.gen_range(1..=2);
    let perp = branch_angle + std::f32::consts::FRAC_PI_2;
    for i in 0..midpoints {
        let t = (i + 1) as f32 / (midpoints + 1) as f32;
        let offset = (rng.gen::<f32>() - 0.5) * length * 0.4;
        points.push(from + (end - from) * t + Vec2::new(perp.cos(), perp.sin()) * offset);
    }
    points.push(end);

    path.branches.push(Branch {
        points,
        width: path.width * (0.6 - depth as f32 * 0.2),
    });

    if rng.gen::<f32>() < 0.3 * (1.0 - depth as f32 * 0.3) {
        grow_branch(rng, path, end, branch_angle, energy, depth + 1);
    }
}
