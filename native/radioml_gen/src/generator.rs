//! End-to-end generation: sweep, assemble, serialize

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use crate::acquisition::{SimulatedSource, WaveformSource};
use crate::config::GenerationConfig;
use crate::dataset::DatasetTable;
use crate::error::Result;
use crate::serializer::write_table;
use crate::sweep::SweepController;

/// A configured generation run over some waveform source
pub struct Generator<S: WaveformSource = SimulatedSource> {
    config: GenerationConfig,
    source: S,
    cancel: Arc<AtomicBool>,
}

impl Generator<SimulatedSource> {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        Self::with_source(config, SimulatedSource::default())
    }
}

impl<S: WaveformSource> Generator<S> {
    pub fn with_source(config: GenerationConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Shared flag; setting it stops the run before the next realization
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Sweep and return the assembled table
    pub fn run(&mut self) -> Result<DatasetTable> {
        let mut table = DatasetTable::new();
        SweepController::new(&self.config, &mut self.source, Arc::clone(&self.cancel)).run(&mut table)?;
        info!(records = table.len(), "generation complete");
        Ok(table)
    }

    /// Sweep and write the dataset, returning the record count
    ///
    /// Nothing is written if the sweep or the encoding fails.
    pub fn run_to_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let table = self.run()?;
        write_table(&table, Some(&self.config), path)
    }
}

/// Generate a dataset with the simulated source
pub fn generate(config: &GenerationConfig) -> Result<DatasetTable> {
    Generator::new(config.clone())?.run()
}

/// Generate a dataset with the simulated source and write it to `path`
pub fn generate_to_file(config: &GenerationConfig, path: impl AsRef<Path>) -> Result<usize> {
    Generator::new(config.clone())?.run_to_file(path)
}
