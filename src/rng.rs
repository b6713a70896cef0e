//! Deterministic pseudo-random source for effects.
//!
//! Seeded xorshift32 shared by fire, matrix rain and sparkle.

const DEFAULT_SEED: u32 = 0x2545_f491;

/// Xorshift32 generator
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Rng {
    /// Create a generator. A zero seed is replaced, xorshift never leaves zero.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Next raw 32-bit value
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `low..=high`
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (high - low) as u32 + 1;
        low + (self.next_u32() % span) as i32
    }

    /// Uniform float in `[0, 1)`
    #[allow(clippy::cast_precision_loss)]
    pub fn unit(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[low, high)`
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit()
    }

    /// `true` with the given probability
    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }
}
