//! Numerically Controlled Oscillator (NCO)
//!
//! Phase-continuous complex oscillator with normalized frequency
//! (cycles per sample). Drives the phase of CPFSK, GFSK and WBFM.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::traits::Carrier;

/// Numerically Controlled Oscillator
#[derive(Debug, Clone)]
pub struct Nco {
    phase: f64,
    phase_inc: f64,
    freq: f64,
}

impl Nco {
    /// Create a new NCO
    ///
    /// # Arguments
    /// * `freq` - Frequency in cycles per sample (-0.5..0.5)
    pub fn new(freq: f64) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 2.0 * PI * freq,
            freq,
        }
    }
}

impl Default for Nco {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Carrier for Nco {
    fn next(&mut self) -> Complex64 {
        let (sin, cos) = self.phase.sin_cos();
        self.phase += self.phase_inc;

        // Keep phase in [0, 2π) for numerical stability
        self.phase = self.phase.rem_euclid(2.0 * PI);

        Complex64::new(cos, sin)
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn phase(&self) -> f64 {
        self.phase
    }

    fn frequency(&self) -> f64 {
        self.freq
    }

    fn set_frequency(&mut self, freq: f64) {
        self.freq = freq;
        self.phase_inc = 2.0 * PI * freq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nco_frequency() {
        let mut nco = Nco::new(0.1);
        assert_eq!(nco.frequency(), 0.1);
        nco.set_frequency(-0.2);
        assert_eq!(nco.frequency(), -0.2);
    }

    #[test]
    fn test_nco_reset() {
        let mut nco = Nco::new(0.0137);
        for _ in 0..100 {
            nco.next();
        }
        assert!(nco.phase() > 0.0);

        nco.reset();
        assert_eq!(nco.phase(), 0.0);
    }

    #[test]
    fn test_nco_unit_amplitude() {
        let mut nco = Nco::new(0.23);
        for _ in 0..1000 {
            let p = nco.next();
            assert!((p.norm() - 1.0).abs() < 1e-10, "NCO magnitude: {}", p.norm());
        }
    }

    #[test]
    fn test_nco_negative_frequency_wraps() {
        let mut nco = Nco::new(-0.3);
        for _ in 0..100_000 {
            nco.next();
        }
        assert!(nco.phase() >= 0.0 && nco.phase() < 2.0 * PI);
    }

    #[test]
    fn test_nco_quarter_rate_cycle() {
        let mut nco = Nco::new(0.25);
        let first = nco.next();
        let second = nco.next();
        assert!((first - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((second - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }
}
