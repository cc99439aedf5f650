//! radioml-gen: generate a RadioML-style modulation dataset

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use phy_modem::Scheme;
use radioml_gen::logging::{init_logging, Verbosity};
use radioml_gen::{generate_to_file, GenerationConfig, MODULATIONS};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "radioml-gen")]
#[command(version, about = "Generate a RadioML 2016-like data set", long_about = None)]
struct Cli {
    /// Output dataset file
    #[arg(short, long)]
    output: PathBuf,

    /// Vectors per (modulation, SNR) key
    #[arg(short = 'n', long = "vectors-per-key", default_value_t = 1000)]
    vectors_per_key: usize,

    /// Random seed
    #[arg(long, default_value_t = 2016)]
    seed: u64,

    /// Vary samples per symbol
    #[arg(long)]
    sps: bool,

    /// Vary excess bandwidth
    #[arg(long)]
    ebw: bool,

    /// Complex samples per vector
    #[arg(long, default_value_t = 128)]
    vector_length: usize,

    /// First SNR in dB (inclusive)
    #[arg(long, default_value_t = -20, allow_negative_numbers = true)]
    snr_start: i64,

    /// Last SNR in dB (exclusive)
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    snr_stop: i64,

    /// SNR step in dB
    #[arg(long, default_value_t = 2)]
    snr_step: i64,

    /// Skip the channel model
    #[arg(long)]
    no_channel: bool,

    /// Restrict to a modulation (repeatable)
    #[arg(long = "modulation", value_parser = parse_scheme)]
    modulations: Vec<Scheme>,

    /// Print progress
    #[arg(short, long)]
    verbose: bool,

    /// Print per-realization detail
    #[arg(short, long)]
    debug: bool,
}

fn parse_scheme(name: &str) -> std::result::Result<Scheme, String> {
    Scheme::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = MODULATIONS.iter().map(|m| m.name()).collect();
        format!("unknown modulation {} (expected one of {})", name, known.join(", "))
    })
}

impl Cli {
    fn config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default()
            .with_vectors_per_key(self.vectors_per_key)
            .with_vector_length(self.vector_length)
            .with_seed(self.seed)
            .with_vary_sps(self.sps)
            .with_vary_ebw(self.ebw)
            .with_snr_range(self.snr_start, self.snr_stop, self.snr_step)
            .with_channel(!self.no_channel);
        if !self.modulations.is_empty() {
            config = config.with_modulations(self.modulations.clone());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.debug));

    let config = cli.config();
    info!(?config, "starting generation");

    let records = generate_to_file(&config, &cli.output)
        .with_context(|| format!("failed to generate {}", cli.output.display()))?;

    info!(records, output = %cli.output.display(), "all done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_config() {
        let cli = Cli::parse_from(["radioml-gen", "-o", "out.rml"]);
        assert_eq!(cli.config(), GenerationConfig::default());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from([
            "radioml-gen",
            "--output",
            "out.rml",
            "-n",
            "50",
            "--seed",
            "7",
            "--sps",
            "--ebw",
            "--snr-start",
            "-10",
            "--snr-stop",
            "10",
            "--snr-step",
            "5",
            "--no-channel",
            "--modulation",
            "qam16",
            "--modulation",
            "AM-SSB",
        ]);
        let config = cli.config();
        assert_eq!(config.vectors_per_key, 50);
        assert_eq!(config.seed, 7);
        assert!(config.vary_sps && config.vary_ebw && !config.apply_channel);
        assert_eq!(config.snr.values().collect::<Vec<_>>(), vec![-10, -5, 0, 5]);
        assert_eq!(config.modulations, vec![Scheme::Qam16, Scheme::AmSsb]);
    }

    #[test]
    fn test_unknown_modulation_rejected() {
        let result = Cli::try_parse_from(["radioml-gen", "-o", "x", "--modulation", "OOK"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_required() {
        assert!(Cli::try_parse_from(["radioml-gen"]).is_err());
    }
}
