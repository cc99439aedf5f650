//! Fixed symbol timing
//!
//! Integer oversampling: every symbol occupies exactly
//! `samples_per_symbol` output samples.

use crate::traits::SymbolTiming;

/// Fixed symbol timing
#[derive(Debug, Clone, Copy)]
pub struct FixedTiming {
    samples_per_symbol: usize,
}

impl FixedTiming {
    /// # Panics
    /// Panics if `samples_per_symbol` is zero
    pub fn new(samples_per_symbol: usize) -> Self {
        assert!(samples_per_symbol > 0, "samples per symbol must be at least 1");
        Self { samples_per_symbol }
    }
}

impl Default for FixedTiming {
    fn default() -> Self {
        Self::new(super::DEFAULT_SAMPLES_PER_SYMBOL)
    }
}

impl SymbolTiming for FixedTiming {
    fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_fixed_timing_zero_sps() {
        let _ = FixedTiming::new(0);
    }

    #[test]
    fn test_fixed_timing_default() {
        let timing = FixedTiming::default();
        assert_eq!(timing.samples_per_symbol(), 8);
        assert_eq!(timing.impulse_offset(), 4);
    }

    #[test]
    fn test_impulse_offset_single_sample() {
        let timing = FixedTiming::new(1);
        assert_eq!(timing.impulse_offset(), 0);
    }
}
