//! Seedable xorshift64 generator used for sampling jitter and track speeds.

/// Deterministic pseudo-random source. The same seed always yields the
/// same jitter, so a sketch can be reproduced frame for frame.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in [0, 1).
    pub fn next_unit(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in [-amplitude, amplitude].
    pub fn symmetric(&mut self, amplitude: f32) -> f32 {
        (self.next_unit() * 2.0 - 1.0) * amplitude
    }
}
