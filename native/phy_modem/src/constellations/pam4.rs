//! PAM4 constellation (2 bits per symbol)
//!
//! Four Gray-coded amplitude levels on the in-phase axis.

use num_complex::Complex64;

use super::gray_level;
use crate::traits::Constellation;

/// 1/sqrt(5): unit average energy for levels {±1, ±3}
const SCALE: f64 = 0.447_213_595_499_957_9;

/// 4-level Pulse Amplitude Modulation
#[derive(Debug, Clone, Copy, Default)]
pub struct Pam4;

impl Constellation for Pam4 {
    fn order(&self) -> usize {
        4
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        Complex64::new(gray_level(sym & 0x03, 4) * SCALE, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pam4_real_axis() {
        for sym in 0..4u8 {
            assert_eq!(Pam4.symbol_to_iq(sym).im, 0.0);
        }
    }

    #[test]
    fn test_pam4_unit_energy() {
        let energy: f64 = (0..4u8).map(|s| Pam4.symbol_to_iq(s).norm_sqr()).sum::<f64>() / 4.0;
        assert!((energy - 1.0).abs() < 1e-12, "Average energy {}", energy);
    }
}
