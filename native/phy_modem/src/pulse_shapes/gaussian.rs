//! Gaussian frequency pulse for GFSK
//!
//! Gaussian filter of bandwidth-time product BT, applied to the held
//! (rectangular) symbol stream. Coefficients sum to 1 so a held ±1 symbol
//! settles at exactly ±1 after filtering.

use crate::traits::PulseShape;
use std::f64::consts::PI;

/// Gaussian frequency-shaping filter
#[derive(Debug, Clone)]
pub struct GaussianPulse {
    coeffs: Vec<f64>,
    span: usize,
    bt: f64,
}

impl GaussianPulse {
    /// # Arguments
    /// * `samples_per_symbol` - Samples per symbol period
    /// * `bt` - Bandwidth-time product (> 0)
    /// * `span` - Filter span in symbols (each side of center)
    pub fn new(samples_per_symbol: usize, bt: f64, span: usize) -> Self {
        let filter_len = 2 * span * samples_per_symbol + 1;
        let center = (filter_len - 1) as f64 / 2.0;
        let sps = samples_per_symbol as f64;

        // Gaussian std-dev in symbol periods
        let sigma = (2.0_f64.ln()).sqrt() / (2.0 * PI * bt);

        let mut coeffs: Vec<f64> = (0..filter_len)
            .map(|i| {
                let t = (i as f64 - center) / sps;
                (-t * t / (2.0 * sigma * sigma)).exp()
            })
            .collect();

        let sum: f64 = coeffs.iter().sum();
        for c in &mut coeffs {
            *c /= sum;
        }

        Self { coeffs, span, bt }
    }

    pub fn bt(&self) -> f64 {
        self.bt
    }
}

impl PulseShape for GaussianPulse {
    fn filter_len(&self) -> usize {
        self.coeffs.len()
    }

    fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    fn span_symbols(&self) -> usize {
        self.span
    }
}
