//! Window extraction and L1 normalization
//!
//! Draws windows from one realization at pseudo-random offsets: the
//! first offset skips channel transients, each following offset advances
//! by at least one window length. Every emitted window is scaled so the
//! sum of its sample magnitudes is 1.

use std::ops::Range;

use num_complex::Complex32;
use rand::Rng;

use crate::acquisition::WaveformRealization;
use crate::dataset::{IqWindow, LabeledVector};

/// First-offset draw range, clear of channel start-up transients
pub const TRANSIENT_SKIP: Range<usize> = 2000..5000;

/// Fraction of the realization length bounding the step between windows
pub const MAX_STEP_FRACTION: f64 = 0.2;

/// Why a sampler stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// The requested number of windows was emitted
    QuotaReached,
    /// The next window would run past the end of the realization
    RealizationExhausted,
}

/// Scale a window to unit L1 norm
///
/// Returns `None` for an all-zero or non-finite window.
pub fn normalize_window(window: &[Complex32]) -> Option<IqWindow> {
    let energy: f64 = window.iter().map(|c| (c.re as f64).hypot(c.im as f64)).sum();
    if !(energy.is_finite() && energy > 0.0) {
        return None;
    }

    let normalized: Vec<Complex32> = window
        .iter()
        .map(|c| Complex32::new((c.re as f64 / energy) as f32, (c.im as f64 / energy) as f32))
        .collect();
    Some(IqWindow::from_samples(&normalized))
}

/// Lazy, non-restartable window sequence over one realization
pub struct WindowSampler<'a, R: Rng> {
    realization: &'a WaveformRealization,
    vector_length: usize,
    remaining: usize,
    rng: &'a mut R,
    offset: usize,
    skipped: usize,
    exhaustion: Option<Exhaustion>,
}

impl<'a, R: Rng> WindowSampler<'a, R> {
    /// Draws the first offset immediately
    pub fn new(
        realization: &'a WaveformRealization,
        vector_length: usize,
        quota: usize,
        rng: &'a mut R,
    ) -> Self {
        let offset = rng.gen_range(TRANSIENT_SKIP);
        Self {
            realization,
            vector_length,
            remaining: quota,
            rng,
            offset,
            skipped: 0,
            exhaustion: None,
        }
    }

    /// Set once the sequence has ended
    pub fn exhaustion(&self) -> Option<Exhaustion> {
        self.exhaustion
    }

    /// Windows dropped for zero or non-finite energy
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Distance to the next window: uniform in
    /// `[vector_length, round(0.2 * len))`, or exactly `vector_length`
    /// when that interval is empty
    fn draw_step(&mut self) -> usize {
        let upper = (self.realization.len() as f64 * MAX_STEP_FRACTION).round() as usize;
        if upper > self.vector_length {
            self.rng.gen_range(self.vector_length..upper)
        } else {
            self.vector_length
        }
    }
}

impl<R: Rng> Iterator for WindowSampler<'_, R> {
    type Item = LabeledVector;

    fn next(&mut self) -> Option<LabeledVector> {
        loop {
            if self.exhaustion.is_some() {
                return None;
            }
            if self.remaining == 0 {
                self.exhaustion = Some(Exhaustion::QuotaReached);
                return None;
            }

            let offset = self.offset;
            let window = match offset
                .checked_add(self.vector_length)
                .and_then(|end| self.realization.samples.get(offset..end))
            {
                Some(window) => window,
                None => {
                    self.exhaustion = Some(Exhaustion::RealizationExhausted);
                    return None;
                }
            };

            let normalized = normalize_window(window);
            let step = self.draw_step();
            self.offset = offset.saturating_add(step);

            match normalized {
                Some(iq_data) => {
                    self.remaining -= 1;
                    let r = self.realization;
                    return Some(LabeledVector {
                        modulation: r.modulation,
                        snr: r.snr_db,
                        realization_index: r.realization_index as i64,
                        window_offset: offset as i64,
                        samples_per_symbol: r.samples_per_symbol,
                        excess_bandwidth: r.excess_bandwidth,
                        iq_data,
                    });
                }
                None => self.skipped += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn realization(samples: Vec<Complex32>) -> WaveformRealization {
        WaveformRealization {
            modulation: "BPSK",
            snr_db: -20,
            samples_per_symbol: f64::NAN,
            excess_bandwidth: f64::NAN,
            realization_index: 1,
            samples,
        }
    }

    fn tone(len: usize) -> Vec<Complex32> {
        (0..len)
            .map(|i| Complex32::from_polar(1.0 + (i % 7) as f32, i as f32 * 0.1))
            .collect()
    }

    #[test]
    fn test_normalize_unit_l1() {
        let w = normalize_window(&tone(128)).unwrap();
        assert_eq!(w.shape(), [2, 128]);
        assert!((w.l1_norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_rejects_silence_and_nan() {
        assert!(normalize_window(&vec![Complex32::new(0.0, 0.0); 16]).is_none());
        let mut bad = tone(16);
        bad[3] = Complex32::new(f32::NAN, 0.0);
        assert!(normalize_window(&bad).is_none());
        let mut inf = tone(16);
        inf[0] = Complex32::new(f32::INFINITY, 0.0);
        assert!(normalize_window(&inf).is_none());
    }

    #[test]
    fn test_quota_reached() {
        let r = realization(tone(80_000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut sampler = WindowSampler::new(&r, 128, 3, &mut rng);
        let windows: Vec<_> = sampler.by_ref().collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(sampler.exhaustion(), Some(Exhaustion::QuotaReached));
        assert!(sampler.next().is_none());
    }

    #[test]
    fn test_labels_copied_from_realization() {
        let r = realization(tone(80_000));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for v in WindowSampler::new(&r, 64, 5, &mut rng) {
            assert_eq!(v.modulation, "BPSK");
            assert_eq!(v.snr, -20);
            assert_eq!(v.realization_index, 1);
            assert!(v.samples_per_symbol.is_nan() && v.excess_bandwidth.is_nan());
            assert_eq!(v.iq_data.shape(), [2, 64]);
        }
    }

    #[test]
    fn test_first_offset_skips_transients() {
        let r = realization(tone(10_000));
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let first = WindowSampler::new(&r, 128, 1, &mut rng).next().unwrap();
            assert!(TRANSIENT_SKIP.contains(&(first.window_offset as usize)));
        }
    }

    #[test]
    fn test_short_realization_yields_nothing() {
        let r = realization(tone(1_999));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut sampler = WindowSampler::new(&r, 128, 10, &mut rng);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.exhaustion(), Some(Exhaustion::RealizationExhausted));
    }

    #[test]
    fn test_window_may_end_exactly_at_realization_end() {
        // Step interval [4, 2) is empty so every step is exactly 4
        let r = realization(tone(10));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sampler = WindowSampler {
            realization: &r,
            vector_length: 4,
            remaining: 10,
            rng: &mut rng,
            offset: 2,
            skipped: 0,
            exhaustion: None,
        };
        let offsets: Vec<i64> = sampler.by_ref().map(|v| v.window_offset).collect();
        assert_eq!(offsets, vec![2, 6]);
        assert_eq!(sampler.exhaustion(), Some(Exhaustion::RealizationExhausted));
    }

    #[test]
    fn test_silent_window_skipped_but_step_drawn() {
        let mut samples = tone(20_000);
        for s in samples.iter_mut().take(6_000) {
            *s = Complex32::new(0.0, 0.0);
        }
        let r = realization(samples);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut sampler = WindowSampler::new(&r, 128, 2, &mut rng);
        let windows: Vec<_> = sampler.by_ref().collect();
        assert!(sampler.skipped() >= 1);
        for w in &windows {
            assert!(w.window_offset >= 6_000 - 128);
            assert!((w.iq_data.l1_norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_quota() {
        let r = realization(tone(10_000));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sampler = WindowSampler::new(&r, 128, 0, &mut rng);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.exhaustion(), Some(Exhaustion::QuotaReached));
    }

    proptest! {
        #[test]
        fn prop_windows_normalized_and_spaced(
            seed in any::<u64>(),
            len in 2_000usize..40_000,
            vector_length in 1usize..512,
            quota in 1usize..50,
        ) {
            let r = realization(tone(len));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let windows: Vec<_> = WindowSampler::new(&r, vector_length, quota, &mut rng).collect();

            prop_assert!(windows.len() <= quota);
            for w in &windows {
                prop_assert!((w.iq_data.l1_norm() - 1.0).abs() < 1e-4);
                prop_assert_eq!(w.iq_data.shape(), [2, vector_length]);
                prop_assert!(w.window_offset as usize + vector_length <= len);
            }
            for pair in windows.windows(2) {
                prop_assert!(pair[1].window_offset - pair[0].window_offset >= vector_length as i64);
            }
        }

        #[test]
        fn prop_same_seed_same_windows(seed in any::<u64>()) {
            let r = realization(tone(12_000));
            let mut rng_a = ChaCha8Rng::seed_from_u64(seed);
            let mut rng_b = ChaCha8Rng::seed_from_u64(seed);
            let a: Vec<_> = WindowSampler::new(&r, 128, 20, &mut rng_a)
                .map(|v| (v.window_offset, v.iq_data))
                .collect();
            let b: Vec<_> = WindowSampler::new(&r, 128, 20, &mut rng_b)
                .map(|v| (v.window_offset, v.iq_data))
                .collect();
            prop_assert_eq!(a, b);
        }
    }
}
