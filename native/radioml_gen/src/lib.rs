//! RadioML-style dataset generator
//!
//! Sweeps SNR × modulation (and optionally symbol rate and excess
//! bandwidth), simulates waveforms through `phy_modem` and
//! `channel_physics`, cuts L1-normalized windows from each realization
//! and writes the labeled windows to a single `.rml` record file with
//! categorical metadata.
//!
//! ```no_run
//! use radioml_gen::{generate_to_file, GenerationConfig};
//!
//! let config = GenerationConfig::default().with_vectors_per_key(100);
//! generate_to_file(&config, "radioml.rml")?;
//! # Ok::<(), radioml_gen::GenerateError>(())
//! ```

pub mod acquisition;
pub mod config;
pub mod dataset;
pub mod format;
pub mod generator;
pub mod logging;
pub mod modulation;
pub mod reader;
pub mod schema;
pub mod serializer;
pub mod sweep;
pub mod windowing;
mod error;

pub use acquisition::{noise_amplitude, AcquisitionRequest, SimulatedSource, WaveformRealization, WaveformSource};
pub use config::{GenerationConfig, SnrRange};
pub use dataset::{DatasetTable, IqWindow, LabeledVector};
pub use error::{GenerateError, Result};
pub use generator::{generate, generate_to_file, Generator};
pub use modulation::{ModulationSpec, MODULATIONS};
pub use reader::{read_dataset, DatasetFile, RecordSet, StoredRecord};
pub use serializer::{encode_table, write_table};
pub use sweep::SweepController;
pub use windowing::{normalize_window, Exhaustion, WindowSampler};
