/// Peak magnitude of the half-open bin range `[start, end)`, scaled to [0, 1].
///
/// Peak rather than mean: kick/bass transients register a frame earlier, at
/// the cost of noisier output.
pub fn band_peak(data: &[u8], start: usize, end: usize) -> f32 {
    let end = end.min(data.len());
    if start >= end {
        return 0.0;
    }
    let peak = data[start..end].iter().fold(0u8, |acc, &v| acc.max(v));
    f32::from(peak) / 255.0
}

// Analysis band layout (fft size 512 -> 256 bins).
pub const KICK_BAND: (usize, usize) = (0, 4);
pub const BASS_BAND: (usize, usize) = (4, 10);
pub const MID_BAND: (usize, usize) = (10, 20);

/// Sliding-window length for the baseline estimate.
pub const ENERGY_WINDOW: usize = 10;

/// How much above its decayed baseline the signal sits, scaled by the
/// decayed peak. Clamped to [0, 1]; a degenerate span (silence, or a
/// baseline that has drifted past the peak) reads as 0 rather than NaN.
pub fn relative_energy(current: f32, baseline: f32, peak: f32) -> f32 {
    let span = peak - baseline;
    if span <= 1e-6 {
        return 0.0;
    }
    ((current - baseline) / span).clamp(0.0, 1.0)
}

/// Converts raw per-frame band peaks into a smoothed, baseline/peak-relative
/// punch signal. All effect intensities are driven by the output of `push`,
/// never by absolute volume.
pub struct EnergyTracker {
    recent: [f32; ENERGY_WINDOW],
    cursor: usize,
    baseline: f32,
    peak: f32,
}

impl Default for EnergyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyTracker {
    pub fn new() -> Self {
        Self {
            recent: [0.0; ENERGY_WINDOW],
            cursor: 0,
            baseline: 0.0,
            peak: 0.0,
        }
    }

    /// Drop all running statistics; called at every play-start so one
    /// session's loudness never biases the next.
    pub fn reset(&mut self) {
        self.recent = [0.0; ENERGY_WINDOW];
        self.cursor = 0;
        self.baseline = 0.0;
        self.peak = 0.0;
    }

    /// Mean of the sliding window.
    pub fn average(&self) -> f32 {
        self.recent.iter().sum::<f32>() / ENERGY_WINDOW as f32
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Feed one frame of band peaks; returns the normalized energy in [0, 1].
    ///
    /// The kick band is weighted up and the mid band down so low-end hits
    /// dominate the visuals. The exponent reshapes the response curve to
    /// favor pronounced transients.
    pub fn push(&mut self, kick: f32, bass: f32, mid: f32) -> f32 {
        let current = (kick * 1.2).max(bass * 0.8).max(mid * 0.6);

        self.recent[self.cursor] = current;
        self.cursor = (self.cursor + 1) % ENERGY_WINDOW;
        let avg = self.average();

        // Baseline chases the window mean slowly from below; peak decays
        // toward the signal from above.
        self.baseline = avg.min(self.baseline * 0.995 + avg * 0.005);
        self.peak = current.max(self.peak * 0.995);

        relative_energy(current, self.baseline, self.peak).powf(1.2)
    }
}
