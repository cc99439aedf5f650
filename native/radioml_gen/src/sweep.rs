//! Parameter sweep
//!
//! Walks SNR × modulation, drawing per-realization parameters from the
//! single run generator and requesting realizations until every
//! (modulation, SNR) key holds its quota of vectors.
//!
//! Per-key state machine:
//!
//! ```text
//! NeedsRealization ──acquire──▶ Draining ──quota met──▶ Done
//!        ▲                         │
//!        └──────exhausted──────────┘
//! ```
//!
//! Draw order on the run generator is fixed: sps, ebw, first window
//! offset, then one step per window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use phy_modem::AlphabetFamily;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::acquisition::{AcquisitionRequest, WaveformRealization, WaveformSource};
use crate::config::GenerationConfig;
use crate::dataset::DatasetTable;
use crate::error::{GenerateError, Result};
use crate::modulation::{ModulationSpec, MODULATIONS};
use crate::windowing::{Exhaustion, WindowSampler};

/// Excess bandwidth draw range
pub const EBW_RANGE: std::ops::RangeInclusive<f64> = 0.1..=1.0;

enum KeyState {
    NeedsRealization,
    Draining(WaveformRealization),
    Done,
}

/// Drives a source through the whole sweep
pub struct SweepController<'a, S: WaveformSource> {
    config: &'a GenerationConfig,
    source: &'a mut S,
    rng: ChaCha8Rng,
    cancel: Arc<AtomicBool>,
}

impl<'a, S: WaveformSource> SweepController<'a, S> {
    pub fn new(config: &'a GenerationConfig, source: &'a mut S, cancel: Arc<AtomicBool>) -> Self {
        Self {
            config,
            source,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            cancel,
        }
    }

    /// Modulations to sweep, in table order
    fn modulations(&self) -> impl Iterator<Item = &'static ModulationSpec> + '_ {
        MODULATIONS
            .iter()
            .filter(move |spec| self.config.modulations.contains(&spec.scheme))
    }

    /// Run every key, appending vectors to `table`
    pub fn run(&mut self, table: &mut DatasetTable) -> Result<()> {
        self.config.validate()?;
        let modulations: Vec<&'static ModulationSpec> = self.modulations().collect();

        for snr_db in self.config.snr.values() {
            info!(snr_db, keys = modulations.len(), "sweeping SNR");
            for &spec in &modulations {
                self.run_key(spec, snr_db, table)?;
            }
        }
        Ok(())
    }

    /// Symbol rate and excess bandwidth for the next realization
    fn draw_parameters(&mut self, spec: &ModulationSpec) -> (Option<usize>, Option<f64>) {
        let discrete = spec.family() == AlphabetFamily::Discrete;

        let sps = match &spec.sps_range {
            Some(range) if self.config.vary_sps && discrete => Some(self.rng.gen_range(range.clone())),
            _ => None,
        };
        let ebw = if self.config.vary_ebw && discrete && spec.accepts_ebw {
            Some(self.rng.gen_range(EBW_RANGE))
        } else {
            None
        };
        (sps, ebw)
    }

    fn run_key(&mut self, spec: &'static ModulationSpec, snr_db: i64, table: &mut DatasetTable) -> Result<()> {
        let quota = self.config.vectors_per_key;
        let mut emitted = 0usize;
        let mut realization_index = 0u64;
        let mut barren = 0usize;
        let mut state = KeyState::NeedsRealization;

        loop {
            state = match state {
                KeyState::NeedsRealization => {
                    if self.cancel.load(Ordering::Relaxed) {
                        warn!(modulation = spec.name(), snr_db, "generation cancelled");
                        return Err(GenerateError::Cancelled);
                    }

                    let (samples_per_symbol, excess_bw) = self.draw_parameters(spec);
                    realization_index += 1;
                    let request = AcquisitionRequest {
                        modulation: spec,
                        snr_db,
                        apply_channel: self.config.apply_channel,
                        samples_per_symbol,
                        excess_bw,
                        realization_index,
                    };
                    KeyState::Draining(self.source.acquire(&request)?)
                }
                KeyState::Draining(realization) => {
                    let mut sampler = WindowSampler::new(
                        &realization,
                        self.config.vector_length,
                        quota - emitted,
                        &mut self.rng,
                    );
                    let before = table.len();
                    table.extend(sampler.by_ref());
                    let produced = table.len() - before;
                    emitted += produced;
                    let exhaustion = sampler.exhaustion();

                    debug!(
                        modulation = spec.name(),
                        snr_db,
                        realization = realization_index,
                        samples = realization.len(),
                        produced,
                        skipped = sampler.skipped(),
                        emitted,
                        exhaustion = ?exhaustion,
                        "drained realization"
                    );

                    if produced == 0 {
                        barren += 1;
                        if barren >= self.config.max_barren_realizations {
                            return Err(GenerateError::Configuration(format!(
                                "{} at {} dB: {} consecutive realizations of {} samples yielded no {}-sample window",
                                spec.name(),
                                snr_db,
                                barren,
                                realization.len(),
                                self.config.vector_length
                            )));
                        }
                    } else {
                        barren = 0;
                    }

                    match exhaustion {
                        Some(Exhaustion::QuotaReached) => KeyState::Done,
                        _ => KeyState::NeedsRealization,
                    }
                }
                KeyState::Done => break,
            };
        }

        info!(
            modulation = spec.name(),
            snr_db,
            vectors = emitted,
            realizations = realization_index,
            "key complete"
        );
        Ok(())
    }
}
