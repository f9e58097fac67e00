/// Per-frame clock feeding the `time` uniform.
///
/// The engine has no timer of its own: the host calls [`FrameClock::tick`]
/// once per rendered frame and the clock advances by a fixed amount,
/// independent of wall-clock delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Amount added to `time` per frame.
    step: f32,
    /// Accumulated shader time.
    time: f32,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            time: 0.0,
        }
    }

    /// Advance by one frame.
    pub fn tick(&mut self) {
        self.time += self.step;
    }

    /// Current value of the `time` uniform.
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.05)
    }
}
