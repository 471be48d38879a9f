//! Injectable randomness
//!
//! Every random draw in the simulation goes through [`RandomSource`] so tests
//! can run with a seeded generator while the browser build uses `Math.random`.

/// Source of uniformly distributed floats in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `[min, max)`; returns `min` for an empty range
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    /// Symmetric value in `[-amount, amount)`
    fn jitter(&mut self, amount: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * amount
    }
}

/// Linear congruential generator, deterministic for a given seed
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RandomSource for Lcg {
    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Top 24 bits fit an f32 mantissa exactly, keeping the result below 1.0
        (self.state >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Browser entropy through `Math.random`. Only usable on wasm targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f32(&mut self) -> f32 {
        let v = js_sys::Math::random() as f32;
        // f64 -> f32 rounding can land exactly on 1.0
        if v >= 1.0 { 0.0 } else { v }
    }
}
