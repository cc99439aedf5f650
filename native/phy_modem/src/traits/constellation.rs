//! Constellation trait - Symbol → I/Q mapping
//!
//! Defines how symbol indices map to complex baseband points.
//! This trait knows nothing about pulse shaping or framing.

use num_complex::Complex64;

/// Symbol alphabet mapping trait
///
/// Implementations define the geometry of the constellation diagram.
/// Points are scaled to unit average energy.
pub trait Constellation: Send + Sync {
    /// Number of points in the constellation (2 for BPSK, 4 for QPSK, etc.)
    fn order(&self) -> usize;

    /// Bits per symbol (log2 of order)
    fn bits_per_symbol(&self) -> usize {
        (self.order() as f64).log2() as usize
    }

    /// Map a symbol index to its constellation point
    ///
    /// Only the low `bits_per_symbol` bits of `sym` are used, so any
    /// source byte is a valid input.
    fn symbol_to_iq(&self, sym: u8) -> Complex64;
}
