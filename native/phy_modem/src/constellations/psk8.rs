//! 8-PSK constellation (3 bits per symbol)
//!
//! Symbol k sits at phase k·45°, Gray mapped so neighbours differ by
//! one bit.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::traits::Constellation;

/// Gray code → phase index
const GRAY_TO_PHASE: [u8; 8] = [0, 1, 3, 2, 7, 6, 4, 5];

/// 8-ary Phase Shift Keying constellation
#[derive(Debug, Clone, Copy, Default)]
pub struct Psk8;

impl Constellation for Psk8 {
    fn order(&self) -> usize {
        8
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let k = GRAY_TO_PHASE[(sym & 0x07) as usize];
        Complex64::from_polar(1.0, k as f64 * PI / 4.0)
    }
}
