//! Root Raised Cosine (RRC) pulse shaping filter
//!
//! Shapes the impulse train of constellation points for every linear
//! scheme. The roll-off factor is the scheme's excess bandwidth.

use crate::traits::PulseShape;
use std::f64::consts::PI;

/// Root Raised Cosine filter
#[derive(Debug, Clone)]
pub struct RootRaisedCosine {
    coeffs: Vec<f64>,
    span: usize,
}

impl RootRaisedCosine {
    /// Create a new RRC filter
    ///
    /// # Arguments
    /// * `samples_per_symbol` - Number of samples per symbol period
    /// * `alpha` - Roll-off factor (excess bandwidth), in (0, 1]
    /// * `span` - Filter span in symbols (each side of center)
    pub fn new(samples_per_symbol: usize, alpha: f64, span: usize) -> Self {
        let coeffs = generate_rrc_coefficients(samples_per_symbol, alpha, span);
        Self { coeffs, span }
    }

    /// Create with default roll-off and span
    pub fn default_for_sps(samples_per_symbol: usize) -> Self {
        Self::new(samples_per_symbol, super::DEFAULT_ALPHA, super::DEFAULT_SPAN)
    }
}

impl PulseShape for RootRaisedCosine {
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

/// Generate RRC filter coefficients
///
/// Standard RRC impulse response with the singular points handled in
/// closed form. Normalized to unit energy.
fn generate_rrc_coefficients(samples_per_symbol: usize, alpha: f64, span: usize) -> Vec<f64> {
    let filter_len = 2 * span * samples_per_symbol + 1;
    let center = (filter_len - 1) as f64 / 2.0;

    let mut coeffs: Vec<f64> = (0..filter_len)
        .map(|i| {
            // t in symbol periods, centered at 0
            let t = (i as f64 - center) / samples_per_symbol as f64;

            if t.abs() < 1e-10 {
                1.0 + alpha * (4.0 / PI - 1.0)
            } else if (t.abs() - 1.0 / (4.0 * alpha)).abs() < 1e-10 {
                let term1 = (1.0 + 2.0 / PI) * (PI / (4.0 * alpha)).sin();
                let term2 = (1.0 - 2.0 / PI) * (PI / (4.0 * alpha)).cos();
                alpha / 2.0_f64.sqrt() * (term1 + term2)
            } else {
                let num = (PI * t * (1.0 - alpha)).sin()
                    + 4.0 * alpha * t * (PI * t * (1.0 + alpha)).cos();
                let den = PI * t * (1.0 - (4.0 * alpha * t).powi(2));
                num / den
            }
        })
        .collect();

    let norm = coeffs.iter().map(|x| x * x).sum::<f64>().sqrt();
    for c in &mut coeffs {
        *c /= norm;
    }

    coeffs
}
