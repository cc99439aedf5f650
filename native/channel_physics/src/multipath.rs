//! Frequency-selective fading
//!
//! Each path is a fractional delay realised as a windowed-sinc
//! interpolator, scaled by the path magnitude and by its own flat fading
//! process. The per-sample channel response is
//!
//!   y[n] = Σ_p h_p(n) · Σ_k g_p[k] · x[n - k]
//!
//! where g_p is the interpolator for path p.

use num_complex::Complex64;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

use crate::fading::FadingProcess;

/// Causal windowed-sinc interpolator for a fractional delay
///
/// Taps are sinc(k - delay) under a Hamming window centred on the delay
/// and scaled by `magnitude`.
fn fractional_delay_taps(delay: f64, magnitude: f64, num_taps: usize) -> Vec<f64> {
    let half_width = (num_taps.max(2) - 1) as f64 / 2.0;

    (0..num_taps)
        .map(|k| {
            let dist = k as f64 - delay;
            if dist.abs() > half_width {
                return 0.0;
            }
            let sinc = if dist.abs() < 1e-10 {
                1.0
            } else {
                (PI * dist).sin() / (PI * dist)
            };
            let window = 0.54 + 0.46 * (PI * dist / half_width).cos();
            magnitude * sinc * window
        })
        .collect()
}

struct Path {
    taps: Vec<f64>,
    fading: FadingProcess,
}

/// Multipath channel with independent fading per path
pub struct SelectiveFading {
    paths: Vec<Path>,
    history: Vec<Complex64>,
    write_idx: usize,
}

impl SelectiveFading {
    /// # Arguments
    /// * `delays` - Path delays in samples (fractional allowed)
    /// * `magnitudes` - Path gains, same length as `delays`
    /// * `num_taps` - Interpolator length per path
    /// * `num_sinusoids`, `doppler`, `rician_k` - Fading parameters, see
    ///   [`FadingProcess::new`]
    /// * `rng` - Parent RNG, one seed per path is drawn from it
    pub fn new(
        delays: &[f64],
        magnitudes: &[f64],
        num_taps: usize,
        num_sinusoids: usize,
        doppler: f64,
        rician_k: Option<f64>,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let paths = delays
            .iter()
            .zip(magnitudes)
            .map(|(&delay, &mag)| Path {
                taps: fractional_delay_taps(delay, mag, num_taps),
                fading: FadingProcess::new(num_sinusoids, doppler, rician_k, rng),
            })
            .collect();

        Self {
            paths,
            history: vec![Complex64::new(0.0, 0.0); num_taps.max(1)],
            write_idx: 0,
        }
    }

    /// Pass one sample through the channel
    pub fn process_sample(&mut self, x: Complex64) -> Complex64 {
        let len = self.history.len();
        self.history[self.write_idx] = x;

        let mut y = Complex64::new(0.0, 0.0);
        for path in &mut self.paths {
            let h = path.fading.next_coefficient();
            let mut acc = Complex64::new(0.0, 0.0);
            for (k, &g) in path.taps.iter().enumerate() {
                acc += self.history[(self.write_idx + len - k) % len] * g;
            }
            y += acc * h;
        }

        self.write_idx = (self.write_idx + 1) % len;
        y
    }

    pub fn process(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }
}
