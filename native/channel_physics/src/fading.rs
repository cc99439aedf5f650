//! Flat fading process for one multipath component
//!
//! Generates complex fading coefficients with a Jakes-like Doppler
//! spectrum using a Gaussian-weighted sum of sinusoids (GWSOS):
//!
//!   s(n) = (1/√(2N)) Σ A_k · exp(j(2π f_k n + φ_k))
//!
//! where A_k = a_k + j·b_k with a_k, b_k ~ N(0, 1) and f_k = f_D cos(α_k)
//! for a uniform angle of arrival α_k. E[|s|²] = 1.
//!
//! With a line-of-sight component of Rician factor K the coefficient is
//!
//!   h(n) = (s(n) + √K · exp(j(2π f_D cos(α_0) n + φ_0))) / √(K + 1)
//!
//! which keeps unit average power.

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

struct Sinusoid {
    amplitude: Complex64,
    freq: f64,
    phase: f64,
}

/// Single fading process, time measured in samples
pub struct FadingProcess {
    doppler: f64,
    sinusoids: Vec<Sinusoid>,
    scale: f64,
    los: Option<Sinusoid>,
    los_gain: f64,
    diffuse_gain: f64,
    n: u64,
}

impl FadingProcess {
    /// # Arguments
    /// * `num_sinusoids` - Number of scattered components
    /// * `doppler` - Maximum Doppler shift in cycles per sample
    /// * `rician_k` - Line-of-sight to scattered power ratio, `None` for Rayleigh
    /// * `rng` - Parent RNG; one seed is drawn from it
    pub fn new(
        num_sinusoids: usize,
        doppler: f64,
        rician_k: Option<f64>,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        // Independent RNG for this process
        let seed: u64 = rng.gen();
        let mut tap_rng = ChaCha8Rng::seed_from_u64(seed);

        let sinusoids = (0..num_sinusoids)
            .map(|_| {
                // Box-Muller for the Gaussian amplitude
                let u1: f64 = tap_rng.gen::<f64>().max(1e-10);
                let u2: f64 = tap_rng.gen();
                let r = (-2.0 * u1.ln()).sqrt();
                let theta = 2.0 * PI * u2;

                let alpha = tap_rng.gen::<f64>() * 2.0 * PI - PI;
                Sinusoid {
                    amplitude: Complex64::from_polar(r, theta),
                    freq: doppler * alpha.cos(),
                    phase: tap_rng.gen::<f64>() * 2.0 * PI,
                }
            })
            .collect();

        let los = rician_k.map(|_| {
            let alpha = tap_rng.gen::<f64>() * 2.0 * PI - PI;
            Sinusoid {
                amplitude: Complex64::new(1.0, 0.0),
                freq: doppler * alpha.cos(),
                phase: tap_rng.gen::<f64>() * 2.0 * PI,
            }
        });

        let k = rician_k.unwrap_or(0.0);

        Self {
            doppler,
            sinusoids,
            scale: (1.0 / (2.0 * num_sinusoids.max(1) as f64)).sqrt(),
            los,
            los_gain: (k / (k + 1.0)).sqrt(),
            diffuse_gain: (1.0 / (k + 1.0)).sqrt(),
            n: 0,
        }
    }

    /// Next complex coefficient
    ///
    /// Zero Doppler means a static, unit-gain channel.
    pub fn next_coefficient(&mut self) -> Complex64 {
        if self.doppler == 0.0 {
            return Complex64::new(1.0, 0.0);
        }

        let t = self.n as f64;
        self.n += 1;

        let diffuse: Complex64 = self
            .sinusoids
            .iter()
            .map(|s| s.amplitude * Complex64::from_polar(1.0, 2.0 * PI * s.freq * t + s.phase))
            .sum::<Complex64>()
            * self.scale;

        match &self.los {
            Some(los) => {
                let direct = Complex64::from_polar(1.0, 2.0 * PI * los.freq * t + los.phase);
                diffuse * self.diffuse_gain + direct * self.los_gain
            }
            None => diffuse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled_coefficient(seed: u64, k: Option<f64>) -> Complex64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut f = FadingProcess::new(8, 1e-3, k, &mut rng);
        for _ in 0..100 {
            f.next_coefficient();
        }
        f.next_coefficient()
    }

    fn coefficient_of_variation(mags: &[f64]) -> f64 {
        let n = mags.len() as f64;
        let mean = mags.iter().sum::<f64>() / n;
        let var = mags.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / n;
        var.sqrt() / mean
    }

    #[test]
    fn test_fading_deterministic() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        let mut f1 = FadingProcess::new(8, 5e-6, Some(4.0), &mut rng1);
        let mut f2 = FadingProcess::new(8, 5e-6, Some(4.0), &mut rng2);
        for _ in 0..100 {
            assert_eq!(f1.next_coefficient(), f2.next_coefficient());
        }
    }

    #[test]
    fn test_zero_doppler_no_fading() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut f = FadingProcess::new(8, 0.0, Some(4.0), &mut rng);
        for _ in 0..1000 {
            assert_eq!(f.next_coefficient(), Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn test_fading_unit_average_power() {
        for k in [None, Some(4.0)] {
            let num = 20_000u64;
            let power: f64 = (0..num)
                .map(|seed| settled_coefficient(1_000_000 + seed, k).norm_sqr())
                .sum::<f64>()
                / num as f64;
            assert!(power > 0.9 && power < 1.1, "k={:?} mean power {}", k, power);
        }
    }

    #[test]
    fn test_rician_fades_less_than_rayleigh() {
        let num = 20_000u64;
        let rayleigh: Vec<f64> = (0..num).map(|s| settled_coefficient(s, None).norm()).collect();
        let rician: Vec<f64> = (0..num).map(|s| settled_coefficient(s, Some(4.0)).norm()).collect();
        assert!(coefficient_of_variation(&rician) < coefficient_of_variation(&rayleigh));
    }

    #[test]
    fn test_rayleigh_magnitude_spread() {
        // Rayleigh CV = sqrt((4 - π) / π)
        let num = 20_000u64;
        let mags: Vec<f64> = (0..num).map(|s| settled_coefficient(7_000_000 + s, None).norm()).collect();
        let expected = ((4.0 - PI) / PI).sqrt();
        let cv = coefficient_of_variation(&mags);
        assert!((cv - expected).abs() < 0.06, "CV {} vs expected {}", cv, expected);
    }

    #[test]
    fn test_fading_numerical_stability() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut f = FadingProcess::new(8, 5e-6, Some(4.0), &mut rng);
        for _ in 0..200_000 {
            let h = f.next_coefficient();
            assert!(h.re.is_finite() && h.im.is_finite());
        }
    }
}
