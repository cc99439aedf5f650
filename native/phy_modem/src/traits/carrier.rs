//! Carrier trait - Frequency/phase generation
//!
//! Defines the local oscillator behavior for frequency and phase
//! modulation. Pure physics - no modulation awareness.

use num_complex::Complex64;

/// Carrier oscillator trait
///
/// Frequencies are normalized (cycles per sample), so the same oscillator
/// serves FSK tone switching and FM deviation.
pub trait Carrier: Send + Sync {
    /// Get the next unit phasor `e^{jφ}` and advance phase
    fn next(&mut self) -> Complex64;

    /// Reset the oscillator phase to zero
    fn reset(&mut self);

    /// Get the current phase (radians)
    fn phase(&self) -> f64;

    /// Get the frequency in cycles per sample
    fn frequency(&self) -> f64;

    /// Retune; phase stays continuous
    fn set_frequency(&mut self, freq: f64);
}
