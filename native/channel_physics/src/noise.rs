//! Additive White Gaussian Noise generator
//!
//! Uses Box-Muller transform for Gaussian samples.

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Gaussian generator with configurable standard deviation
pub struct NoiseGenerator {
    /// Standard deviation of real samples; total power of complex samples
    std_dev: f64,

    /// Internal RNG
    rng: ChaCha8Rng,

    /// Cached second sample from Box-Muller
    cached: Option<f64>,
}

impl NoiseGenerator {
    pub fn new(std_dev: f64, seed: u64) -> Self {
        Self {
            std_dev,
            rng: ChaCha8Rng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// Derive the seed from a parent RNG
    pub fn derived(std_dev: f64, seed_rng: &mut ChaCha8Rng) -> Self {
        Self::new(std_dev, seed_rng.gen())
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Generate next Gaussian noise sample using Box-Muller transform
    pub fn next_sample(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached * self.std_dev;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.cached = Some(r * theta.sin());

        r * theta.cos() * self.std_dev
    }

    /// Circular complex Gaussian sample with E[|n|²] = std_dev²
    pub fn next_complex(&mut self) -> Complex64 {
        let re = self.next_sample();
        let im = self.next_sample();
        Complex64::new(re, im) * FRAC_1_SQRT_2
    }
}
