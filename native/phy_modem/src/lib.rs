//! PHY Modem - Trait-based complex-baseband waveform engine
//!
//! Produces the raw transmit waveforms used for modulation-classification
//! datasets: a source alphabet (symbol bytes or audio-like samples) and a
//! family of modulators mapping that stream to complex baseband.
//!
//! Each trait represents one orthogonal axis of modulator configuration;
//! `modem::build_modulator` matches the scheme once and returns a boxed,
//! fully specialized modulator.

pub mod traits;
pub mod constellations;
pub mod pulse_shapes;
pub mod carriers;
pub mod timing;
pub mod modem;
pub mod source;
mod error;
mod utils;

// Re-export core types for convenience
pub use traits::{Constellation, PulseShape, Carrier, SymbolTiming};
pub use constellations::{Bpsk, Qpsk, Psk8, Pam4, Qam16, Qam64};
pub use pulse_shapes::{GaussianPulse, RootRaisedCosine};
pub use carriers::Nco;
pub use timing::FixedTiming;
pub use modem::{
    build_modulator, AnalogModulator, FskModulator, LinearModulator, ModulatorParams,
    Scheme, WaveformModulator,
};
pub use source::{source_alphabet, AlphabetFamily, SourceStream};
pub use error::ModemError;
