//! Pulse shaping filter implementations
//!
//! Root Raised Cosine for the linear schemes, Gaussian frequency pulse
//! for GFSK.

mod rrc;
mod gaussian;

pub use rrc::RootRaisedCosine;
pub use gaussian::GaussianPulse;

/// Default roll-off factor (excess bandwidth) for linear schemes
pub const DEFAULT_ALPHA: f64 = 0.35;

/// Default bandwidth-time product for GFSK
pub const DEFAULT_BT: f64 = 0.35;

/// Default filter span in symbols (each side)
pub const DEFAULT_SPAN: usize = 6;
