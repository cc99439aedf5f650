//! Continuous-phase frequency shift keying
//!
//! Binary CPFSK and GFSK share one engine: the symbol stream is held for
//! `samples_per_symbol` samples, optionally smoothed by a Gaussian pulse,
//! and drives the instantaneous frequency of an NCO so phase never jumps.

use num_complex::Complex64;

use super::{Scheme, WaveformModulator};
use crate::carriers::Nco;
use crate::error::ModemError;
use crate::pulse_shapes::GaussianPulse;
use crate::source::SourceStream;
use crate::timing::FixedTiming;
use crate::traits::{Carrier, PulseShape, SymbolTiming};

/// Modulation index (peak-to-peak deviation over symbol rate)
pub const MODULATION_INDEX: f64 = 0.5;

/// Gaussian pulse span in symbols (each side)
pub(crate) const GAUSSIAN_SPAN: usize = 2;

/// Binary continuous-phase FSK modulator
pub struct FskModulator {
    scheme: Scheme,
    timing: FixedTiming,
    shaping: Option<GaussianPulse>,
    history: Vec<f64>,
    nco: Nco,
    /// Frequency (cycles/sample) for a ±1 symbol
    deviation: f64,
}

impl FskModulator {
    /// Rectangular frequency pulse (CPFSK)
    pub fn continuous_phase(timing: FixedTiming) -> Self {
        Self::build(Scheme::Cpfsk, timing, None)
    }

    /// Gaussian-filtered frequency pulse (GFSK)
    pub fn gaussian(pulse: GaussianPulse, timing: FixedTiming) -> Self {
        Self::build(Scheme::Gfsk, timing, Some(pulse))
    }

    fn build(scheme: Scheme, timing: FixedTiming, shaping: Option<GaussianPulse>) -> Self {
        let history_len = shaping.as_ref().map(|p| p.filter_len()).unwrap_or(1);
        let deviation = MODULATION_INDEX / (2.0 * timing.samples_per_symbol() as f64);
        Self {
            scheme,
            timing,
            shaping,
            history: vec![0.0; history_len],
            nco: Nco::default(),
            deviation,
        }
    }

    /// Modulate symbol bytes (low bit only) to complex baseband
    pub fn modulate_symbols(&mut self, symbols: &[u8]) -> Vec<Complex64> {
        let sps = self.timing.samples_per_symbol();
        let mut output = Vec::with_capacity(symbols.len() * sps);

        for &sym in symbols {
            let level = if sym & 0x01 == 0 { -1.0 } else { 1.0 };

            for _ in 0..sps {
                let freq = match &self.shaping {
                    Some(pulse) => {
                        self.history.rotate_left(1);
                        let last = self.history.len() - 1;
                        self.history[last] = level;
                        pulse.filter(&self.history)
                    }
                    None => level,
                };

                self.nco.set_frequency(freq * self.deviation);
                output.push(self.nco.next());
            }
        }

        output
    }
}

impl WaveformModulator for FskModulator {
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
            *x = 0.0;
        }
        self.nco.reset();
    }
}
