//! BPSK constellation (1 bit per symbol)
//!
//! Symbol 0 → +1 (0°)
//! Symbol 1 → -1 (180°)

use num_complex::Complex64;

use crate::traits::Constellation;

/// Binary Phase Shift Keying constellation
#[derive(Debug, Clone, Copy, Default)]
pub struct Bpsk;

impl Constellation for Bpsk {
    fn order(&self) -> usize {
        2
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        match sym & 0x01 {
            0 => Complex64::new(1.0, 0.0),
            _ => Complex64::new(-1.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpsk_points() {
        assert_eq!(Bpsk.symbol_to_iq(0), Complex64::new(1.0, 0.0));
        assert_eq!(Bpsk.symbol_to_iq(1), Complex64::new(-1.0, 0.0));
        // Upper bits are ignored
        assert_eq!(Bpsk.symbol_to_iq(0xFE), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_bpsk_order() {
        assert_eq!(Bpsk.order(), 2);
        assert_eq!(Bpsk.bits_per_symbol(), 1);
    }
}
