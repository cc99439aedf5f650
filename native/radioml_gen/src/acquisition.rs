//! Signal acquisition
//!
//! Turns one (modulation, SNR, optional sps/ebw) request into one complex
//! waveform realization: source alphabet → modulator → optional dynamic
//! channel. The simulated source owns no run state; every realization is
//! a pure function of its request.

use channel_physics::{ChannelProfile, DynamicChannel};
use num_complex::{Complex32, Complex64};
use phy_modem::{build_modulator, source_alphabet, ModulatorParams};
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::modulation::ModulationSpec;

/// One acquisition call
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionRequest<'a> {
    pub modulation: &'a ModulationSpec,
    pub snr_db: i64,
    pub apply_channel: bool,
    pub samples_per_symbol: Option<usize>,
    pub excess_bw: Option<f64>,
    /// 1-based counter of realizations requested for this key
    pub realization_index: u64,
}

/// Simulated waveform tagged with the parameters that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformRealization {
    pub modulation: &'static str,
    pub snr_db: i64,
    /// NaN when not chosen
    pub samples_per_symbol: f64,
    /// NaN when not chosen
    pub excess_bandwidth: f64,
    pub realization_index: u64,
    pub samples: Vec<Complex32>,
}

impl WaveformRealization {
    pub fn new(request: &AcquisitionRequest<'_>, samples: Vec<Complex32>) -> Self {
        Self {
            modulation: request.modulation.name(),
            snr_db: request.snr_db,
            samples_per_symbol: request.samples_per_symbol.map_or(f64::NAN, |s| s as f64),
            excess_bandwidth: request.excess_bw.unwrap_or(f64::NAN),
            realization_index: request.realization_index,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Anything that can produce realizations for the sweep
pub trait WaveformSource {
    fn acquire(&mut self, request: &AcquisitionRequest<'_>) -> Result<WaveformRealization>;
}

/// Linear noise amplitude for an SNR in dB
pub fn noise_amplitude(snr_db: i64) -> f64 {
    10f64.powf(-(snr_db as f64) / 10.0)
}

/// Base for per-realization source seeds
const SOURCE_SEED: u64 = 0x5EED_0F_5A11;

/// SplitMix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Source seed for one realization of one key
fn source_seed(base: u64, request: &AcquisitionRequest<'_>) -> u64 {
    let parts = [
        request.modulation.scheme as u64,
        request.snr_db as u64,
        request.realization_index,
    ];
    parts
        .iter()
        .fold(mix(base), |acc, &p| mix(acc ^ p.wrapping_add(0x9E37_79B9_7F4A_7C15)))
}

/// Source → modulator → channel simulation
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    profile: ChannelProfile,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(ChannelProfile::default())
    }
}

impl SimulatedSource {
    pub fn new(profile: ChannelProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ChannelProfile {
        &self.profile
    }
}

impl WaveformSource for SimulatedSource {
    fn acquire(&mut self, request: &AcquisitionRequest<'_>) -> Result<WaveformRealization> {
        let spec = request.modulation;
        let params = ModulatorParams {
            samples_per_symbol: request.samples_per_symbol,
            excess_bw: request.excess_bw,
        };
        let mut modulator = build_modulator(spec.scheme, params)?;

        let source = source_alphabet(spec.family(), spec.min_request_len, source_seed(SOURCE_SEED, request));
        let mut waveform = modulator.modulate(&source)?;

        let mut drift = None;
        if request.apply_channel {
            let mut channel = DynamicChannel::new(&self.profile, noise_amplitude(request.snr_db))?;
            waveform = channel.process(&waveform);
            drift = Some(channel.state());
        }

        let samples = to_complex32(&waveform).ok_or_else(|| {
            GenerateError::Simulation(format!(
                "{} at {} dB produced non-finite samples",
                spec.name(),
                request.snr_db
            ))
        })?;

        debug!(
            modulation = spec.name(),
            snr_db = request.snr_db,
            realization = request.realization_index,
            samples = samples.len(),
            sro_hz = drift.map(|s| s.sro_hz),
            cfo_hz = drift.map(|s| s.cfo_hz),
            "acquired realization"
        );

        Ok(WaveformRealization::new(request, samples))
    }
}

/// Narrow to single precision; `None` if anything is non-finite
fn to_complex32(waveform: &[Complex64]) -> Option<Vec<Complex32>> {
    waveform
        .iter()
        .map(|c| {
            let z = Complex32::new(c.re as f32, c.im as f32);
            (z.re.is_finite() && z.im.is_finite()).then_some(z)
        })
        .collect()
}
