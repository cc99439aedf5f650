//! Carrier/oscillator implementations

mod nco;

pub use nco::Nco;
