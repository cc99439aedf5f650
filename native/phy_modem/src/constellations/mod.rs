//! Constellation implementations
//!
//! The linear digital schemes of the RadioML sweep:
//! - BPSK (1 bit/symbol)
//! - QPSK (2 bits/symbol)
//! - 8-PSK (3 bits/symbol)
//! - PAM4 (2 bits/symbol, real axis only)
//! - 16-QAM (4 bits/symbol)
//! - 64-QAM (6 bits/symbol)
//!
//! All constellations are scaled to unit average symbol energy.

mod bpsk;
mod qpsk;
mod psk8;
mod pam4;
mod qam16;
mod qam64;

pub use bpsk::Bpsk;
pub use qpsk::Qpsk;
pub use psk8::Psk8;
pub use pam4::Pam4;
pub use qam16::Qam16;
pub use qam64::Qam64;

/// Gray-coded amplitude levels for one axis of a square QAM/PAM grid.
///
/// `levels` is the number of points on the axis (4 for 16-QAM, 8 for
/// 64-QAM); the returned value is un-normalized (odd integers).
pub(crate) fn gray_level(bits: u8, levels: usize) -> f64 {
    // Gray decode: position on the axis
    let mut pos = bits as usize;
    let mut shift = pos >> 1;
    while shift != 0 {
        pos ^= shift;
        shift >>= 1;
    }
    (2 * pos) as f64 - (levels - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_levels_cover_axis() {
        let mut levels: Vec<f64> = (0..4u8).map(|b| gray_level(b, 4)).collect();
        levels.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(levels, vec![-3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_gray_neighbours_differ_by_one_bit() {
        // Adjacent amplitude levels must map from codes one bit apart
        let mut by_level: Vec<(f64, u8)> = (0..8u8).map(|b| (gray_level(b, 8), b)).collect();
        by_level.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for pair in by_level.windows(2) {
            assert_eq!((pair[0].1 ^ pair[1].1).count_ones(), 1);
        }
    }
}
