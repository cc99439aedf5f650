//! PulseShape trait - Spectral shaping / ISI control
//!
//! Defines the FIR shaping filter applied to the impulse train of
//! constellation points (linear schemes) or frequency pulses (GFSK).

use num_complex::Complex64;

/// Pulse shaping filter trait
pub trait PulseShape: Send + Sync {
    /// Length of the filter in samples
    fn filter_len(&self) -> usize;

    /// Get the filter coefficients
    fn coefficients(&self) -> &[f64];

    /// Filter span in symbols (each side of center)
    fn span_symbols(&self) -> usize;

    /// Convolve a real history buffer (oldest sample first)
    fn filter(&self, history: &[f64]) -> f64 {
        debug_assert_eq!(history.len(), self.filter_len());
        self.coefficients()
            .iter()
            .rev()
            .zip(history.iter())
            .map(|(c, h)| c * h)
            .sum()
    }

    /// Convolve a complex history buffer (oldest sample first)
    fn filter_complex(&self, history: &[Complex64]) -> Complex64 {
        debug_assert_eq!(history.len(), self.filter_len());
        self.coefficients()
            .iter()
            .rev()
            .zip(history.iter())
            .map(|(c, h)| h * *c)
            .sum()
    }
}
