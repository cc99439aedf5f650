//! 64-QAM constellation
//!
//! Square 8×8 grid, Gray coded per axis: low three bits select the
//! in-phase level, high three bits the quadrature level.

use num_complex::Complex64;

use super::gray_level;
use crate::traits::Constellation;

/// 1/sqrt(42): unit average energy for levels {±1, ±3, ±5, ±7}²
const SCALE: f64 = 0.154_303_349_962_091_9;

/// Square 64-QAM constellation
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam64;

impl Constellation for Qam64 {
    fn order(&self) -> usize {
        64
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let i = gray_level(sym & 0x07, 8);
        let q = gray_level((sym >> 3) & 0x07, 8);
        Complex64::new(i * SCALE, q * SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qam64_unit_energy() {
        let energy: f64 = (0..64u8).map(|s| Qam64.symbol_to_iq(s).norm_sqr()).sum::<f64>() / 64.0;
        assert!((energy - 1.0).abs() < 1e-12, "Average energy {}", energy);
    }

    #[test]
    fn test_qam64_corner() {
        let max = (0..64u8)
            .map(|s| Qam64.symbol_to_iq(s).norm())
            .fold(0.0_f64, f64::max);
        // Corner point (7,7)/sqrt(42)
        assert!((max - (98.0_f64 / 42.0).sqrt()).abs() < 1e-9);
    }
}
