//! Dynamic channel model
//!
//! Applies, in order:
//! 1. Sample-rate offset drift (resampling)
//! 2. Carrier-frequency offset drift (phase rotation)
//! 3. Frequency-selective Rician fading over fractional-delay paths
//! 4. AWGN with a fixed amplitude
//!
//! All internal generators are seeded from `ChannelProfile::noise_seed`,
//! so a channel built from the same profile and noise amplitude always
//! produces the same output for the same input.

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::drift::{FrequencyOffset, RandomWalk, SampleRateOffset};
use crate::multipath::SelectiveFading;
use crate::noise::NoiseGenerator;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    #[error("invalid channel profile: {0}")]
    InvalidProfile(String),
}

/// Impairment parameters, fixed for the lifetime of a channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelProfile {
    /// Nominal sample rate in Hz, used to scale the offset walks
    pub sample_rate: f64,
    pub sro_std_dev: f64,
    pub sro_max_dev: f64,
    pub cfo_std_dev: f64,
    pub cfo_max_dev: f64,
    /// Sinusoids per fading process
    pub num_sinusoids: usize,
    pub doppler_hz: f64,
    /// Rician K factor, `None` for Rayleigh paths
    pub rician_k: Option<f64>,
    /// Path delays in samples
    pub delays: Vec<f64>,
    pub magnitudes: Vec<f64>,
    /// Interpolator length per path
    pub num_taps: usize,
    pub noise_seed: u64,
}

impl Default for ChannelProfile {
    fn default() -> Self {
        Self {
            sample_rate: 200e3,
            sro_std_dev: 0.01,
            sro_max_dev: 50.0,
            cfo_std_dev: 0.01,
            cfo_max_dev: 500.0,
            num_sinusoids: 8,
            doppler_hz: 1.0,
            rician_k: Some(4.0),
            delays: vec![0.0, 0.9, 1.7],
            magnitudes: vec![1.0, 0.8, 0.3],
            num_taps: 8,
            noise_seed: 0x1337,
        }
    }
}

impl ChannelProfile {
    pub fn validate(&self) -> Result<(), ChannelError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ChannelError::InvalidProfile(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        let non_negative = [
            ("sro_std_dev", self.sro_std_dev),
            ("sro_max_dev", self.sro_max_dev),
            ("cfo_std_dev", self.cfo_std_dev),
            ("cfo_max_dev", self.cfo_max_dev),
            ("doppler_hz", self.doppler_hz),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ChannelError::InvalidProfile(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if let Some(k) = self.rician_k {
            if !(k.is_finite() && k >= 0.0) {
                return Err(ChannelError::InvalidProfile(format!("invalid Rician K {}", k)));
            }
        }
        if self.delays.is_empty() || self.delays.len() != self.magnitudes.len() {
            return Err(ChannelError::InvalidProfile(format!(
                "{} delays for {} magnitudes",
                self.delays.len(),
                self.magnitudes.len()
            )));
        }
        if self.num_taps == 0 {
            return Err(ChannelError::InvalidProfile("num_taps must be non-zero".into()));
        }
        if let Some(&d) = self
            .delays
            .iter()
            .find(|&&d| !(d.is_finite() && d >= 0.0 && d < self.num_taps as f64))
        {
            return Err(ChannelError::InvalidProfile(format!(
                "path delay {} outside interpolator span of {} taps",
                d, self.num_taps
            )));
        }
        Ok(())
    }
}

/// Channel state for telemetry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    pub sample_index: u64,
    pub sro_hz: f64,
    pub cfo_hz: f64,
}

pub struct DynamicChannel {
    sro: SampleRateOffset,
    cfo: FrequencyOffset,
    fading: SelectiveFading,
    noise: NoiseGenerator,
    sample_index: u64,
}

impl DynamicChannel {
    /// Build a channel adding complex noise of total power `noise_amplitude²`
    pub fn new(profile: &ChannelProfile, noise_amplitude: f64) -> Result<Self, ChannelError> {
        profile.validate()?;
        if !(noise_amplitude.is_finite() && noise_amplitude >= 0.0) {
            return Err(ChannelError::InvalidProfile(format!(
                "noise amplitude must be finite and non-negative, got {}",
                noise_amplitude
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(profile.noise_seed);

        let noise = NoiseGenerator::derived(noise_amplitude, &mut rng);
        let sro = SampleRateOffset::new(
            RandomWalk::new(profile.sro_std_dev, profile.sro_max_dev, rng.gen()),
            profile.sample_rate,
        );
        let cfo = FrequencyOffset::new(
            RandomWalk::new(profile.cfo_std_dev, profile.cfo_max_dev, rng.gen()),
            profile.sample_rate,
        );
        let fading = SelectiveFading::new(
            &profile.delays,
            &profile.magnitudes,
            profile.num_taps,
            profile.num_sinusoids,
            profile.doppler_hz / profile.sample_rate,
            profile.rician_k,
            &mut rng,
        );

        Ok(Self {
            sro,
            cfo,
            fading,
            noise,
            sample_index: 0,
        })
    }

    /// Process a block of samples through the channel
    ///
    /// The resampling stage may shorten the block by a sample or so.
    pub fn process(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let resampled = self.sro.process(input);
        let rotated = self.cfo.process(&resampled);
        let output: Vec<Complex64> = rotated
            .into_iter()
            .map(|x| self.fading.process_sample(x) + self.noise.next_complex())
            .collect();
        self.sample_index += output.len() as u64;
        output
    }

    pub fn state(&self) -> ChannelState {
        ChannelState {
            sample_index: self.sample_index,
            sro_hz: self.sro.offset_hz(),
            cfo_hz: self.cfo.offset_hz(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(num_samples: usize) -> Vec<Complex64> {
        (0..num_samples)
            .map(|i| Complex64::from_polar(1.0, 0.05 * i as f64))
            .collect()
    }

    fn mean_power(signal: &[Complex64]) -> f64 {
        signal.iter().map(|c| c.norm_sqr()).sum::<f64>() / signal.len() as f64
    }

    #[test]
    fn test_default_profile_is_valid() {
        assert!(ChannelProfile::default().validate().is_ok());
    }

    #[test]
    fn test_mismatched_paths_rejected() {
        let profile = ChannelProfile {
            magnitudes: vec![1.0],
            ..ChannelProfile::default()
        };
        assert!(matches!(
            DynamicChannel::new(&profile, 0.1),
            Err(ChannelError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_delay_beyond_taps_rejected() {
        let profile = ChannelProfile {
            delays: vec![0.0, 9.0],
            magnitudes: vec![1.0, 0.5],
            ..ChannelProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_negative_noise_rejected() {
        assert!(DynamicChannel::new(&ChannelProfile::default(), -1.0).is_err());
        assert!(DynamicChannel::new(&ChannelProfile::default(), f64::NAN).is_err());
    }

    #[test]
    fn test_channel_deterministic() {
        let input = tone(5000);
        let mut a = DynamicChannel::new(&ChannelProfile::default(), 0.1).unwrap();
        let mut b = DynamicChannel::new(&ChannelProfile::default(), 0.1).unwrap();
        assert_eq!(a.process(&input), b.process(&input));
    }

    #[test]
    fn test_output_length_close_to_input() {
        let input = tone(20_000);
        let mut ch = DynamicChannel::new(&ChannelProfile::default(), 0.01).unwrap();
        let out = ch.process(&input);
        assert!(out.len() + 5 >= input.len() && out.len() <= input.len());
        assert_eq!(ch.state().sample_index, out.len() as u64);
    }

    #[test]
    fn test_output_finite() {
        let input = tone(20_000);
        let mut ch = DynamicChannel::new(&ChannelProfile::default(), 10.0).unwrap();
        assert!(ch.process(&input).iter().all(|c| c.re.is_finite() && c.im.is_finite()));
    }

    #[test]
    fn test_noise_power_follows_amplitude() {
        // Zero input isolates the noise floor
        let input = vec![Complex64::new(0.0, 0.0); 50_000];
        let mut ch = DynamicChannel::new(&ChannelProfile::default(), 0.5).unwrap();
        let power = mean_power(&ch.process(&input));
        assert!((power - 0.25).abs() < 0.02, "noise power {}", power);
    }

    #[test]
    fn test_noise_free_channel_passes_signal() {
        let input = tone(20_000);
        let mut ch = DynamicChannel::new(&ChannelProfile::default(), 0.0).unwrap();
        let out = ch.process(&input);
        let power = mean_power(&out[100..]);
        assert!(power > 0.05 && power < 5.0, "signal power {}", power);
    }

    #[test]
    fn test_state_tracks_offsets() {
        let profile = ChannelProfile {
            cfo_std_dev: 1.0,
            cfo_max_dev: 3.0,
            ..ChannelProfile::default()
        };
        let mut ch = DynamicChannel::new(&profile, 0.0).unwrap();
        ch.process(&tone(1000));
        let state = ch.state();
        assert!(state.cfo_hz.abs() <= 3.0);
        assert!(state.sro_hz.abs() <= profile.sro_max_dev);
    }
}
