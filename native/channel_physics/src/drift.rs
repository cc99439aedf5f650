//! Slowly drifting oscillator impairments
//!
//! Sample-rate offset (SRO) and carrier-frequency offset (CFO) each follow
//! a bounded Gaussian random walk in Hz. SRO resamples the signal by
//! linear interpolation; CFO rotates it by the accumulated phase.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::noise::NoiseGenerator;

/// Gaussian random walk clipped to ±max_dev
pub struct RandomWalk {
    value: f64,
    max_dev: f64,
    steps: NoiseGenerator,
}

impl RandomWalk {
    pub fn new(std_dev: f64, max_dev: f64, seed: u64) -> Self {
        Self {
            value: 0.0,
            max_dev,
            steps: NoiseGenerator::new(std_dev, seed),
        }
    }

    /// Take one step and return the new value
    pub fn step(&mut self) -> f64 {
        self.value = (self.value + self.steps.next_sample()).clamp(-self.max_dev, self.max_dev);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Resampler whose rate wanders around 1.0
pub struct SampleRateOffset {
    walk: RandomWalk,
    sample_rate: f64,
}

impl SampleRateOffset {
    pub fn new(walk: RandomWalk, sample_rate: f64) -> Self {
        Self { walk, sample_rate }
    }

    /// Current offset in Hz
    pub fn offset_hz(&self) -> f64 {
        self.walk.value()
    }

    /// Resample one waveform
    ///
    /// Input position advances by `1 + sro / sample_rate` per output
    /// sample, so the output is within a fraction of a percent of the
    /// input length.
    pub fn process(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut output = Vec::with_capacity(input.len());
        let mut position = 0.0_f64;

        while (position as usize) + 1 < input.len() {
            let idx = position as usize;
            let mu = position - idx as f64;
            output.push(input[idx] * (1.0 - mu) + input[idx + 1] * mu);

            position += 1.0 + self.walk.step() / self.sample_rate;
        }

        output
    }
}

/// Phase rotator whose frequency wanders around 0 Hz
pub struct FrequencyOffset {
    walk: RandomWalk,
    sample_rate: f64,
    phase: f64,
}

impl FrequencyOffset {
    pub fn new(walk: RandomWalk, sample_rate: f64) -> Self {
        Self {
            walk,
            sample_rate,
            phase: 0.0,
        }
    }

    /// Current offset in Hz
    pub fn offset_hz(&self) -> f64 {
        self.walk.value()
    }

    pub fn process(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        input
            .iter()
            .map(|&x| {
                let y = x * Complex64::from_polar(1.0, self.phase);
                self.phase = (self.phase + 2.0 * PI * self.walk.step() / self.sample_rate)
                    .rem_euclid(2.0 * PI);
                y
            })
            .collect()
    }
}
