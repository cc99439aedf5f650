//! Modulator implementations
//!
//! Linear schemes compose Constellation, PulseShape and SymbolTiming into
//! a generic `LinearModulator`; frequency schemes run an NCO; analog
//! schemes map audio straight to complex baseband. `build_modulator`
//! matches the scheme once and returns the specialized type behind the
//! `WaveformModulator` trait object.

mod linear;
mod fsk;
mod analog;

pub use linear::LinearModulator;
pub use fsk::FskModulator;
pub use analog::AnalogModulator;

use num_complex::Complex64;

use crate::constellations::*;
use crate::error::ModemError;
use crate::pulse_shapes::{GaussianPulse, RootRaisedCosine, DEFAULT_ALPHA, DEFAULT_BT, DEFAULT_SPAN};
use crate::source::{AlphabetFamily, SourceStream};
use crate::timing::{FixedTiming, DEFAULT_SAMPLES_PER_SYMBOL};

/// Every modulation scheme the engine can synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    Bpsk,
    Qpsk,
    Psk8,
    Pam4,
    Qam16,
    Qam64,
    Gfsk,
    Cpfsk,
    Wbfm,
    AmDsb,
    AmSsb,
}

impl Scheme {
    pub const ALL: [Scheme; 11] = [
        Scheme::Bpsk,
        Scheme::Qpsk,
        Scheme::Psk8,
        Scheme::Pam4,
        Scheme::Qam16,
        Scheme::Qam64,
        Scheme::Gfsk,
        Scheme::Cpfsk,
        Scheme::Wbfm,
        Scheme::AmDsb,
        Scheme::AmSsb,
    ];

    /// Stable label used in datasets
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bpsk => "BPSK",
            Self::Qpsk => "QPSK",
            Self::Psk8 => "8PSK",
            Self::Pam4 => "PAM4",
            Self::Qam16 => "QAM16",
            Self::Qam64 => "QAM64",
            Self::Gfsk => "GFSK",
            Self::Cpfsk => "CPFSK",
            Self::Wbfm => "WBFM",
            Self::AmDsb => "AM-DSB",
            Self::AmSsb => "AM-SSB",
        }
    }

    pub fn from_name(name: &str) -> Option<Scheme> {
        Self::ALL.iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn family(&self) -> AlphabetFamily {
        match self {
            Self::Wbfm | Self::AmDsb | Self::AmSsb => AlphabetFamily::Continuous,
            _ => AlphabetFamily::Discrete,
        }
    }

    /// Whether the modulator takes a `samples_per_symbol` parameter
    pub fn accepts_samples_per_symbol(&self) -> bool {
        self.family() == AlphabetFamily::Discrete
    }

    /// Whether the modulator takes an `excess_bw` parameter
    ///
    /// For GFSK the value is the Gaussian bandwidth-time product.
    pub fn accepts_excess_bw(&self) -> bool {
        self.family() == AlphabetFamily::Discrete && *self != Self::Cpfsk
    }

    /// Smallest oversampling the scheme can run at
    pub fn min_samples_per_symbol(&self) -> usize {
        match self {
            Self::Gfsk => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional keyword parameters for `build_modulator`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModulatorParams {
    pub samples_per_symbol: Option<usize>,
    pub excess_bw: Option<f64>,
}

/// Type-erased modulator
pub trait WaveformModulator: Send + Sync {
    /// Scheme label
    fn name(&self) -> &'static str;

    /// Map a whole source stream to complex baseband
    fn modulate(&mut self, source: &SourceStream) -> Result<Vec<Complex64>, ModemError>;

    /// Clear filter and oscillator state
    fn reset(&mut self);
}

/// Build a modulator for the given scheme
///
/// Only parameters the scheme supports may be passed; anything else is
/// rejected rather than silently ignored.
pub fn build_modulator(
    scheme: Scheme,
    params: ModulatorParams,
) -> Result<Box<dyn WaveformModulator>, ModemError> {
    if params.samples_per_symbol.is_some() && !scheme.accepts_samples_per_symbol() {
        return Err(ModemError::UnsupportedParameter {
            scheme: scheme.name(),
            parameter: "samples_per_symbol",
        });
    }
    if params.excess_bw.is_some() && !scheme.accepts_excess_bw() {
        return Err(ModemError::UnsupportedParameter {
            scheme: scheme.name(),
            parameter: "excess_bw",
        });
    }

    let sps = params.samples_per_symbol.unwrap_or(DEFAULT_SAMPLES_PER_SYMBOL);
    if sps < scheme.min_samples_per_symbol() {
        return Err(ModemError::InvalidParameter {
            scheme: scheme.name(),
            parameter: "samples_per_symbol",
            value: sps as f64,
        });
    }

    if let Some(ebw) = params.excess_bw {
        if !(ebw > 0.0 && ebw <= 1.0) {
            return Err(ModemError::InvalidParameter {
                scheme: scheme.name(),
                parameter: "excess_bw",
                value: ebw,
            });
        }
    }

    let timing = FixedTiming::new(sps);
    let rrc = || RootRaisedCosine::new(sps, params.excess_bw.unwrap_or(DEFAULT_ALPHA), DEFAULT_SPAN);

    let modulator: Box<dyn WaveformModulator> = match scheme {
        Scheme::Bpsk => Box::new(LinearModulator::new(scheme, Bpsk, rrc(), timing)),
        Scheme::Qpsk => Box::new(LinearModulator::new(scheme, Qpsk, rrc(), timing)),
        Scheme::Psk8 => Box::new(LinearModulator::new(scheme, Psk8, rrc(), timing)),
        Scheme::Pam4 => Box::new(LinearModulator::new(scheme, Pam4, rrc(), timing)),
        Scheme::Qam16 => Box::new(LinearModulator::new(scheme, Qam16, rrc(), timing)),
        Scheme::Qam64 => Box::new(LinearModulator::new(scheme, Qam64, rrc(), timing)),
        Scheme::Gfsk => {
            let bt = params.excess_bw.unwrap_or(DEFAULT_BT);
            let pulse = GaussianPulse::new(sps, bt, fsk::GAUSSIAN_SPAN);
            Box::new(FskModulator::gaussian(pulse, timing))
        }
        Scheme::Cpfsk => Box::new(FskModulator::continuous_phase(timing)),
        Scheme::Wbfm | Scheme::AmDsb | Scheme::AmSsb => Box::new(AnalogModulator::new(scheme)),
    };

    Ok(modulator)
}
