//! Generation run configuration

use phy_modem::Scheme;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::modulation::MODULATIONS;

/// Half-open SNR sweep in dB: `start` inclusive, `stop` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnrRange {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl Default for SnrRange {
    fn default() -> Self {
        Self {
            start: -20,
            stop: 20,
            step: 2,
        }
    }
}

impl SnrRange {
    pub fn new(start: i64, stop: i64, step: i64) -> Self {
        Self { start, stop, step }
    }

    /// SNR values in sweep order; empty when `step` is not positive
    pub fn values(&self) -> impl Iterator<Item = i64> {
        let step = usize::try_from(self.step).ok().filter(|&s| s > 0);
        let range = if step.is_some() { self.start..self.stop } else { 0..0 };
        range.step_by(step.unwrap_or(1))
    }
}

/// Immutable per-run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub snr: SnrRange,
    /// Labeled vectors per (modulation, SNR) key
    pub vectors_per_key: usize,
    /// Complex samples per window
    pub vector_length: usize,
    pub seed: u64,
    pub vary_sps: bool,
    pub vary_ebw: bool,
    pub apply_channel: bool,
    /// Schemes to sweep; swept in capability-table order regardless of
    /// the order given here
    #[serde(with = "scheme_names")]
    pub modulations: Vec<Scheme>,
    /// Consecutive window-less realizations of one key before giving up
    pub max_barren_realizations: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            snr: SnrRange::default(),
            vectors_per_key: 1000,
            vector_length: 128,
            seed: 2016,
            vary_sps: false,
            vary_ebw: false,
            apply_channel: true,
            modulations: MODULATIONS.iter().map(|m| m.scheme).collect(),
            max_barren_realizations: 100,
        }
    }
}

impl GenerationConfig {
    pub fn with_snr_range(mut self, start: i64, stop: i64, step: i64) -> Self {
        self.snr = SnrRange::new(start, stop, step);
        self
    }

    pub fn with_vectors_per_key(mut self, n: usize) -> Self {
        self.vectors_per_key = n;
        self
    }

    pub fn with_vector_length(mut self, len: usize) -> Self {
        self.vector_length = len;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_vary_sps(mut self, vary: bool) -> Self {
        self.vary_sps = vary;
        self
    }

    pub fn with_vary_ebw(mut self, vary: bool) -> Self {
        self.vary_ebw = vary;
        self
    }

    pub fn with_channel(mut self, apply: bool) -> Self {
        self.apply_channel = apply;
        self
    }

    pub fn with_modulations(mut self, modulations: Vec<Scheme>) -> Self {
        self.modulations = modulations;
        self
    }

    pub fn with_max_barren_realizations(mut self, n: usize) -> Self {
        self.max_barren_realizations = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.snr.step <= 0 {
            return Err(GenerateError::Configuration(format!(
                "SNR step must be positive, got {}",
                self.snr.step
            )));
        }
        if self.snr.start >= self.snr.stop {
            return Err(GenerateError::Configuration(format!(
                "empty SNR range [{}, {})",
                self.snr.start, self.snr.stop
            )));
        }
        if self.vectors_per_key == 0 {
            return Err(GenerateError::Configuration(
                "vectors per key must be positive".into(),
            ));
        }
        if self.vector_length == 0 {
            return Err(GenerateError::Configuration(
                "vector length must be positive".into(),
            ));
        }
        if self.modulations.is_empty() {
            return Err(GenerateError::Configuration("no modulations selected".into()));
        }
        if self.max_barren_realizations == 0 {
            return Err(GenerateError::Configuration(
                "max barren realizations must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Schemes serialized by their dataset label
mod scheme_names {
    use phy_modem::Scheme;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(schemes: &[Scheme], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(schemes.iter().map(|s| s.name()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Scheme>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                Scheme::from_name(name)
                    .ok_or_else(|| D::Error::custom(format!("unknown modulation {}", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.snr, SnrRange::new(-20, 20, 2));
        assert_eq!(config.vectors_per_key, 1000);
        assert_eq!(config.vector_length, 128);
        assert_eq!(config.seed, 2016);
        assert!(!config.vary_sps && !config.vary_ebw);
        assert!(config.apply_channel);
        assert_eq!(config.modulations.len(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snr_values_half_open() {
        let values: Vec<i64> = SnrRange::default().values().collect();
        assert_eq!(values.len(), 20);
        assert_eq!(values[0], -20);
        assert_eq!(*values.last().unwrap(), 18);

        let single: Vec<i64> = SnrRange::new(-20, -18, 2).values().collect();
        assert_eq!(single, vec![-20]);

        let odd: Vec<i64> = SnrRange::new(0, 10, 3).values().collect();
        assert_eq!(odd, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_snr_values_bad_step_is_empty() {
        assert_eq!(SnrRange::new(0, 10, 0).values().count(), 0);
        assert_eq!(SnrRange::new(0, 10, -2).values().count(), 0);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            GenerationConfig::default().with_snr_range(0, 10, 0),
            GenerationConfig::default().with_snr_range(0, 10, -1),
            GenerationConfig::default().with_snr_range(10, 10, 2),
            GenerationConfig::default().with_vectors_per_key(0),
            GenerationConfig::default().with_vector_length(0),
            GenerationConfig::default().with_modulations(vec![]),
            GenerationConfig::default().with_max_barren_realizations(0),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(GenerateError::Configuration(_))),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_json_uses_scheme_labels() {
        let config = GenerationConfig::default().with_modulations(vec![Scheme::Psk8, Scheme::AmDsb]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""modulations":["8PSK","AM-DSB"]"#), "{}", json);
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_rejects_unknown_scheme() {
        let mut value = serde_json::to_value(GenerationConfig::default()).unwrap();
        value["modulations"] = serde_json::json!(["BPSK", "OOK"]);
        assert!(serde_json::from_value::<GenerationConfig>(value).is_err());
    }
}
