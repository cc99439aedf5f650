//! QPSK constellation (2 bits per symbol), Gray coded
//!
//! Points sit on the diagonals at unit radius.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::traits::Constellation;

/// Quadrature Phase Shift Keying constellation
#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl Constellation for Qpsk {
    fn order(&self) -> usize {
        4
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let i = if sym & 0x01 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        let q = if sym & 0x02 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        Complex64::new(i, q)
    }
}
