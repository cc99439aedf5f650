//! Analog modulators for continuous sources
//!
//! WBFM drives an NCO with the audio, AM-DSB keeps the carrier and
//! scales its envelope, AM-SSB transmits the analytic signal (upper
//! sideband) built with a windowed Hilbert transformer.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::{Scheme, WaveformModulator};
use crate::carriers::Nco;
use crate::error::ModemError;
use crate::source::SourceStream;
use crate::traits::Carrier;

/// Peak FM deviation in cycles per sample
pub const FM_DEVIATION: f64 = 0.1;

/// AM modulation depth
pub const AM_INDEX: f64 = 0.8;

/// Hilbert transformer length (odd, type III FIR)
const HILBERT_TAPS: usize = 65;

/// Modulator for WBFM, AM-DSB and AM-SSB
pub struct AnalogModulator {
    scheme: Scheme,
    nco: Nco,
    hilbert: Vec<f64>,
}

impl AnalogModulator {
    /// # Panics
    /// Panics if `scheme` is not a continuous-family scheme
    pub fn new(scheme: Scheme) -> Self {
        assert!(
            matches!(scheme, Scheme::Wbfm | Scheme::AmDsb | Scheme::AmSsb),
            "{} is not an analog scheme",
            scheme
        );
        let hilbert = if scheme == Scheme::AmSsb {
            hilbert_coefficients(HILBERT_TAPS)
        } else {
            Vec::new()
        };
        Self {
            scheme,
            nco: Nco::default(),
            hilbert,
        }
    }

    /// Modulate audio samples in [-1, 1]; output has the same length
    pub fn modulate_audio(&mut self, audio: &[f64]) -> Vec<Complex64> {
        match self.scheme {
            Scheme::Wbfm => audio
                .iter()
                .map(|&a| {
                    self.nco.set_frequency(FM_DEVIATION * a);
                    self.nco.next()
                })
                .collect(),
            Scheme::AmDsb => audio
                .iter()
                .map(|&a| Complex64::new(1.0 + AM_INDEX * a, 0.0))
                .collect(),
            _ => self.analytic(audio),
        }
    }

    /// a[n - D] + j·H{a}[n], D = group delay of the Hilbert FIR
    fn analytic(&self, audio: &[f64]) -> Vec<Complex64> {
        let delay = (self.hilbert.len() - 1) / 2;
        (0..audio.len())
            .map(|n| {
                let re = if n >= delay { audio[n - delay] } else { 0.0 };
                let im: f64 = self
                    .hilbert
                    .iter()
                    .enumerate()
                    .take(n + 1)
                    .map(|(k, h)| h * audio[n - k])
                    .sum();
                Complex64::new(re, im)
            })
            .collect()
    }
}

impl WaveformModulator for AnalogModulator {
    fn name(&self) -> &'static str {
        self.scheme.name()
    }

    fn modulate(&mut self, source: &SourceStream) -> Result<Vec<Complex64>, ModemError> {
        match source {
            SourceStream::Audio(audio) => Ok(self.modulate_audio(audio)),
            SourceStream::Symbols(_) => Err(ModemError::SourceMismatch {
                scheme: self.scheme.name(),
                expected: "continuous",
            }),
        }
    }

    fn reset(&mut self) {
        self.nco.reset();
    }
}

/// Hamming-windowed ideal Hilbert transformer
fn hilbert_coefficients(num_taps: usize) -> Vec<f64> {
    let center = (num_taps - 1) / 2;
    (0..num_taps)
        .map(|i| {
            let n = i as isize - center as isize;
            let ideal = if n % 2 == 0 { 0.0 } else { 2.0 / (PI * n as f64) };
            let window = 0.54 - 0.46 * (2.0 * PI * i as f64 / (num_taps - 1) as f64).cos();
            ideal * window
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f64, len: usize) -> Vec<f64> {
        (0..len).map(|n| (2.0 * PI * freq * n as f64).cos()).collect()
    }

    #[test]
    fn test_wbfm_constant_envelope() {
        let mut m = AnalogModulator::new(Scheme::Wbfm);
        let out = m.modulate_audio(&tone(0.01, 1000));
        assert!(out.iter().all(|c| (c.norm() - 1.0).abs() < 1e-10));
    }

    #[test]
    fn test_am_dsb_envelope_tracks_audio() {
        let mut m = AnalogModulator::new(Scheme::AmDsb);
        let out = m.modulate_audio(&[1.0, 0.0, -1.0]);
        assert!((out[0].re - 1.8).abs() < 1e-12);
        assert!((out[1].re - 1.0).abs() < 1e-12);
        assert!((out[2].re - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_am_ssb_is_single_sideband() {
        // A cosine tone becomes a positive-frequency phasor: constant
        // magnitude once the filter has filled
        let mut m = AnalogModulator::new(Scheme::AmSsb);
        let out = m.modulate_audio(&tone(0.1, 2000));
        for c in &out[200..] {
            assert!((c.norm() - 1.0).abs() < 0.05, "magnitude {}", c.norm());
        }
        // Positive rotation sample to sample
        let step = (out[1001] / out[1000]).arg();
        assert!((step - 2.0 * PI * 0.1).abs() < 0.05);
    }

    #[test]
    #[should_panic(expected = "not an analog scheme")]
    fn test_digital_scheme_rejected() {
        let _ = AnalogModulator::new(Scheme::Bpsk);
    }
}
