//! SymbolTiming trait - Sample/symbol rate relationship
//!
//! Defines how many samples make up one symbol period.

/// Symbol timing trait
pub trait SymbolTiming: Send + Sync {
    /// Samples per symbol period
    fn samples_per_symbol(&self) -> usize;

    /// Sample index within symbol period where the impulse is placed
    fn impulse_offset(&self) -> usize {
        self.samples_per_symbol() / 2
    }
}
