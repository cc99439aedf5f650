//! Generic linear modulator
//!
//! Composes Constellation, PulseShape and SymbolTiming into a complex
//! baseband modulation engine. No runtime branching on modulation type.

use num_complex::Complex64;

use super::{Scheme, WaveformModulator};
use crate::error::ModemError;
use crate::source::SourceStream;
use crate::traits::{Constellation, PulseShape, SymbolTiming};

/// Generic linear modulator composed of trait implementations
///
/// # Type Parameters
/// * `C` - Constellation (symbol → I/Q mapping)
/// * `P` - Pulse shape (spectral shaping)
/// * `T` - Symbol timing (samples per symbol)
pub struct LinearModulator<C, P, T>
where
    C: Constellation,
    P: PulseShape,
    T: SymbolTiming,
{
    scheme: Scheme,
    constellation: C,
    pulse: P,
    timing: T,
    history: Vec<Complex64>,
    gain: f64,
}

impl<C, P, T> LinearModulator<C, P, T>
where
    C: Constellation,
    P: PulseShape,
    T: SymbolTiming,
{
    /// Create a new modulator
    ///
    /// # Arguments
    /// * `scheme` - Label reported by `name()`
    /// * `constellation` - Symbol mapping implementation
    /// * `pulse` - Pulse shaping filter
    /// * `timing` - Symbol timing
    pub fn new(scheme: Scheme, constellation: C, pulse: P, timing: T) -> Self {
        let filter_len = pulse.filter_len();
        // One unit-energy pulse per symbol period: scale so average
        // output power stays ~1 at any oversampling
        let gain = (timing.samples_per_symbol() as f64).sqrt();
        Self {
            scheme,
            constellation,
            pulse,
            timing,
            history: vec![Complex64::new(0.0, 0.0); filter_len],
            gain,
        }
    }

    /// Modulate symbols to complex baseband samples
    ///
    /// Output length is `symbols.len() * samples_per_symbol`.
    pub fn modulate_symbols(&mut self, symbols: &[u8]) -> Vec<Complex64> {
        let sps = self.timing.samples_per_symbol();
        let impulse_offset = self.timing.impulse_offset();
        let mut output = Vec::with_capacity(symbols.len() * sps);

        for &sym in symbols {
            let point = self.constellation.symbol_to_iq(sym);

            for sample_idx in 0..sps {
                // Shift history (oldest first), impulse at symbol center
                self.history.rotate_left(1);
                let last = self.history.len() - 1;
                self.history[last] = if sample_idx == impulse_offset {
                    point
                } else {
                    Complex64::new(0.0, 0.0)
                };

                output.push(self.pulse.filter_complex(&self.history) * self.gain);
            }
        }

        output
    }
}

impl<C, P, T> WaveformModulator for LinearModulator<C, P, T>
where
    C: Constellation,
    P: PulseShape,
    T: SymbolTiming,
{
    fn name(&self) -> &'static str {
        self.scheme.name()
    }

    fn modulate(&mut self, source: &SourceStream) -> Result<Vec<Complex64>, ModemError> {
        match source {
            SourceStream::Symbols(symbols) => Ok(self.modulate_symbols(symbols)),
            SourceStream::Audio(_) => Err(ModemError::SourceMismatch {
                scheme: self.scheme.name(),
                expected: "discrete",
            }),
        }
    }

    fn reset(&mut self) {
        for x in self.history.iter_mut() {
            *x = Complex64::new(0.0, 0.0);
        }
    }
}
