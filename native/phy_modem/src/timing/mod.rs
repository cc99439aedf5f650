//! Symbol timing implementations

mod fixed;

pub use fixed::FixedTiming;

/// Oversampling used when the sweep does not vary samples per symbol
pub const DEFAULT_SAMPLES_PER_SYMBOL: usize = 8;
