/// Monotonic simulation clock.
///
/// Display refresh deltas are clamped so a stalled frame (tab switch,
/// breakpoint) does not teleport agents.

#[derive(Debug, Clone)]
pub struct SimulationClock {
    elapsed: f64,
    max_delta: f32,
    frame: u64,
}

impl SimulationClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_delta,
            frame: 0,
        }
    }

    /// Record one frame of `dt` seconds. Returns the delta actually applied:
    /// clamped to `[0, max_delta]`, with NaN treated as 0.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, self.max_delta) };
        self.elapsed += f64::from(dt);
        self.frame += 1;
        dt
    }

    /// Seconds of simulated time
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}
