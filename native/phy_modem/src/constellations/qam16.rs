//! 16-QAM constellation
//!
//! Square 4×4 grid, Gray coded per axis: low two bits select the
//! in-phase level, high two bits the quadrature level.

use num_complex::Complex64;

use super::gray_level;
use crate::traits::Constellation;

/// 1/sqrt(10): unit average energy for levels {±1, ±3}²
const SCALE: f64 = 0.316_227_766_016_837_94;

/// Square 16-QAM constellation
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam16;

impl Constellation for Qam16 {
    fn order(&self) -> usize {
        16
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let i = gray_level(sym & 0x03, 4);
        let q = gray_level((sym >> 2) & 0x03, 4);
        Complex64::new(i * SCALE, q * SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qam16_unit_energy() {
        let energy: f64 = (0..16u8).map(|s| Qam16.symbol_to_iq(s).norm_sqr()).sum::<f64>() / 16.0;
        assert!((energy - 1.0).abs() < 1e-12, "Average energy {}", energy);
    }

    #[test]
    fn test_qam16_points_distinct() {
        let points: Vec<Complex64> = (0..16u8).map(|s| Qam16.symbol_to_iq(s)).collect();
        for (a, pa) in points.iter().enumerate() {
            for pb in points.iter().skip(a + 1) {
                assert!((pa - pb).norm() > 0.1);
            }
        }
    }

    #[test]
    fn test_qam16_order() {
        assert_eq!(Qam16.order(), 16);
        assert_eq!(Qam16.bits_per_symbol(), 4);
    }
}
