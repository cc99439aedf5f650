//! Source alphabets
//!
//! The raw stream fed to a modulator: random symbol bytes for discrete
//! schemes, an audio-like band-limited waveform for analog schemes.
//! Both are a pure function of (family, length, seed).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

use crate::utils::{lerp, normalize_peak};

/// Whether the symbol source is digital or analog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlphabetFamily {
    Discrete,
    Continuous,
}

impl AlphabetFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Continuous => "continuous",
        }
    }
}

/// Raw modulator input
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStream {
    /// One byte per symbol; modulators use the low bits they need
    Symbols(Vec<u8>),
    /// Peak-normalized audio-like samples in [-1, 1]
    Audio(Vec<f64>),
}

impl SourceStream {
    pub fn len(&self) -> usize {
        match self {
            Self::Symbols(s) => s.len(),
            Self::Audio(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn family(&self) -> AlphabetFamily {
        match self {
            Self::Symbols(_) => AlphabetFamily::Discrete,
            Self::Audio(_) => AlphabetFamily::Continuous,
        }
    }
}

/// Number of tones mixed into the audio-like source
const AUDIO_TONES: usize = 4;

/// Samples between envelope knots (syllable-like amplitude changes)
const ENVELOPE_KNOT_SPACING: usize = 400;

/// Generate `len` source items for the given family
pub fn source_alphabet(family: AlphabetFamily, len: usize, seed: u64) -> SourceStream {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    match family {
        AlphabetFamily::Discrete => {
            let mut symbols = vec![0u8; len];
            rng.fill(&mut symbols[..]);
            SourceStream::Symbols(symbols)
        }
        AlphabetFamily::Continuous => SourceStream::Audio(audio_like(len, &mut rng)),
    }
}

/// Sum of a few low tones under a piecewise-linear envelope, plus a
/// little hiss. Occupies well under a quarter of the sample rate so FM
/// and AM occupy a plausible bandwidth.
fn audio_like(len: usize, rng: &mut ChaCha8Rng) -> Vec<f64> {
    let tones: Vec<(f64, f64, f64)> = (0..AUDIO_TONES)
        .map(|_| {
            let freq = rng.gen_range(0.002..0.03);
            let amp = rng.gen_range(0.2..1.0);
            let phase = rng.gen_range(0.0..2.0 * PI);
            (freq, amp, phase)
        })
        .collect();

    let knots: Vec<f64> = (0..len / ENVELOPE_KNOT_SPACING + 2)
        .map(|_| rng.gen_range(0.1..1.0))
        .collect();

    let mut audio: Vec<f64> = (0..len)
        .map(|n| {
            let k = n / ENVELOPE_KNOT_SPACING;
            let mu = (n % ENVELOPE_KNOT_SPACING) as f64 / ENVELOPE_KNOT_SPACING as f64;
            let envelope = lerp(knots[k], knots[k + 1], mu);

            let voiced: f64 = tones
                .iter()
                .map(|&(f, a, p)| a * (2.0 * PI * f * n as f64 + p).sin())
                .sum();
            let hiss = rng.gen_range(-0.02..0.02);

            envelope * voiced + hiss
        })
        .collect();

    normalize_peak(&mut audio);
    audio
}
